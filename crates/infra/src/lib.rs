//! Infrastructure layer: stores, identity tracking, fan-out/fan-in over stores, feed
//! ingestion, and the catalog service facade.

pub mod assembler;
pub mod config;
pub mod decomposer;
pub mod error;
pub mod feed;
pub mod identity;
pub mod ingestion;
pub mod service;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use assembler::Assembler;
pub use config::{CatalogConfig, EmptyCategoryPolicy};
pub use decomposer::Decomposer;
pub use error::{CatalogError, CatalogResult, StoreError, StoreResult};
pub use feed::{FeedEnvelope, FeedError, FeedSource, HttpFeedSource, RetryPolicy};
pub use identity::{IdentityTracker, InMemoryIdentityTracker};
pub use ingestion::{FeedIngestionPipeline, IngestReport};
pub use service::CatalogService;
pub use store::{CatalogStores, DependentStore, PostgresCatalogStore, ProductStore};
