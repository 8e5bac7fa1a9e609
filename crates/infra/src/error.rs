//! Infrastructure and boundary error types.

use thiserror::Error;

/// Result type for store collaborators.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store collaborator failure.
///
/// These are **infrastructure errors** (connectivity, decoding, backend faults) as
/// opposed to "no such record", which stores report as `None` or an empty list.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("failed to decode stored record: {0}")]
    Decode(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Result type for catalog operations surfaced to callers.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Boundary error for catalog operations.
///
/// - `NotFound`: a requested id/sku/category matched nothing. Not retried.
/// - `Service`: anything else, wrapped with the operation and key that failed.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    NotFound(String),

    #[error("{context}: {source}")]
    Service {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CatalogError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn service(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Service {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}
