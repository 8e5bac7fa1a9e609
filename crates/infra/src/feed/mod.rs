//! Bulk product feed: fetch collaborator and its retry policy.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as JsonValue;

pub mod http;
pub mod retry;

pub use http::HttpFeedSource;
pub use retry::RetryPolicy;

/// Response envelope of the feed: `{ "products": [ ... ] }`.
///
/// Entries are kept as raw JSON so that one malformed entry can be dropped on its own
/// instead of failing the decode of the whole envelope. The `products` key itself is
/// required; a body without it is not a feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedEnvelope {
    pub products: Vec<JsonValue>,
}

impl FeedEnvelope {
    pub fn from_slice(body: &[u8]) -> Result<Self, FeedError> {
        serde_json::from_slice(body).map_err(|e| FeedError::Decode(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("feed responded with status {0}")]
    Status(u16),

    #[error("failed to decode feed: {0}")]
    Decode(String),

    #[error("feed fetch timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("feed fetch failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<FeedError> },
}

/// Fetches one feed envelope per call.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FeedEnvelope, FeedError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_keeps_entries_raw() {
        let envelope = FeedEnvelope::from_slice(br#"{"products": [{"id": 1}, "junk"], "total": 2}"#).unwrap();
        assert_eq!(envelope.products.len(), 2);
    }

    #[test]
    fn body_without_products_key_is_a_decode_error() {
        for body in [&br#"{"message":"Not here","status":200}"#[..], br#"{"error":"moved"}"#, b"[]"] {
            let err = FeedEnvelope::from_slice(body).unwrap_err();
            assert!(matches!(err, FeedError::Decode(_)), "accepted {}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn empty_products_list_is_a_valid_envelope() {
        let envelope = FeedEnvelope::from_slice(br#"{"products": []}"#).unwrap();
        assert!(envelope.products.is_empty());
    }
}
