use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use super::{FeedEnvelope, FeedError, FeedSource};

/// Feed source doing a single JSON `GET` per fetch.
#[derive(Debug, Clone, Default)]
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<FeedEnvelope, FeedError> {
        let resp = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FeedError::Status(resp.status().as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        FeedEnvelope::from_slice(&body)
    }
}
