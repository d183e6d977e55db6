use lambda_runtime::{handler_fn, Context, Error};
use podcast_fulfillment::{config::Config, fulfill, get_router, util};
use serde_json::Value;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    util::init_log();

    let cfg = Config::from_env().map_err(util::to_simple)?;
    log::info!("serving feed {}", cfg.feed_url);
    let router = Arc::new(get_router(&cfg));

    lambda_runtime::run(handler_fn(move |event: Value, ctx: Context| {
        let router = router.clone();
        async move {
            log::debug!("request {}", ctx.request_id);
            fulfill(router.as_ref(), event).await
        }
    }))
    .await?;
    Ok(())
}
