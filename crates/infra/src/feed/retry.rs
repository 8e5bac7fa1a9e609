use std::time::Duration;

use tracing::warn;

use super::{FeedEnvelope, FeedError, FeedSource};

/// Bounded retry for feed fetches.
///
/// Attempts are immediate (no backoff). `timeout` covers all attempts together, so a
/// slow first attempt can use up the whole budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values below 1 are treated as 1.
    pub max_attempts: u32,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            timeout: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, timeout: Duration) -> Self {
        Self {
            max_attempts,
            timeout,
        }
    }

    pub async fn fetch_with_retry(
        &self,
        source: &dyn FeedSource,
        url: &str,
    ) -> Result<FeedEnvelope, FeedError> {
        match tokio::time::timeout(self.timeout, self.attempts(source, url)).await {
            Ok(result) => result,
            Err(_) => Err(FeedError::Timeout(self.timeout)),
        }
    }

    async fn attempts(&self, source: &dyn FeedSource, url: &str) -> Result<FeedEnvelope, FeedError> {
        let max = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match source.fetch(url).await {
                Ok(envelope) => return Ok(envelope),
                Err(e) if attempt < max => {
                    warn!(url, attempt, max_attempts = max, error = %e, "feed fetch failed, retrying");
                    attempt += 1;
                }
                Err(e) => {
                    return Err(FeedError::RetriesExhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
            }
        }
    }
}
