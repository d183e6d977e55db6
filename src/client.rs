use crate::{
    entity::EpisodeRecord,
    error::{CoreError, CoreResult},
    parser,
};
use async_trait::async_trait;
use std::io::BufReader;
use std::time::Duration;

pub type FeedSnapshot = Vec<EpisodeRecord>;

/// Anything that can hand back a freshly fetched feed, most recent first.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> CoreResult<FeedSnapshot>;
}

/// HTTP feed source. One blocking `ureq` call per fetch, no retry.
pub struct Client {
    agent: ureq::Agent,
}

impl Client {
    pub fn new(timeout: Duration) -> Self {
        Client {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    fn fetch_blocking(agent: &ureq::Agent, url: &str) -> CoreResult<FeedSnapshot> {
        let resp = agent
            .get(url)
            .call()
            .map_err(|e| CoreError::Fetch(format!("GET {}: {}", url, e)))?;
        let rd = BufReader::new(resp.into_reader());
        let items = parser::read_items(rd)?;
        Ok(items.into_iter().map(EpisodeRecord::from).collect())
    }
}

#[async_trait]
impl FeedSource for Client {
    async fn fetch(&self, url: &str) -> CoreResult<FeedSnapshot> {
        log::debug!("fetching feed {}", url);
        let agent = self.agent.clone();
        let owned = url.to_string();
        tokio::task::spawn_blocking(move || Client::fetch_blocking(&agent, &owned))
            .await
            .map_err(|e| CoreError::Fetch(format!("fetch task failed: {}", e)))?
    }
}
