pub mod catalog;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod model;
pub mod parser;
pub mod response;
pub mod router;
pub mod util;
pub mod webhook;

use client::FeedSource;
use config::Config;
use response::PlaybackResponseBuilder;
use router::IntentRouter;
use serde_json::Value;
use simple_error::SimpleResult;
use webhook::{WebhookRequest, WebhookResponse};

// default impl of the feed source
pub fn get_source(cfg: &Config) -> impl FeedSource {
    client::Client::new(cfg.fetch_timeout)
}

pub fn get_router(cfg: &Config) -> IntentRouter<impl FeedSource> {
    IntentRouter::new(
        get_source(cfg),
        &cfg.feed_url,
        PlaybackResponseBuilder::new(&cfg.brand_icon_url),
    )
}

/// One webhook call. Only an unreadable event is an error; feed and
/// resolution failures come back as a closing turn.
pub async fn fulfill<S: FeedSource>(
    router: &IntentRouter<S>,
    event: Value,
) -> SimpleResult<WebhookResponse> {
    let req: WebhookRequest = serde_json::from_value(event).map_err(util::to_simple)?;
    log::debug!(
        "response {} query '{}'",
        req.response_id,
        req.query_result.query_text
    );
    let turn = router.handle(&req.intent()).await;
    Ok(turn.into())
}
