//! Per-entity store collaborators.
//!
//! One store per entity kind: the core product store plus one dependent store each for
//! reviews, images and tags. The stores are independently consistent; nothing here
//! spans more than one of them.

use std::sync::Arc;

use async_trait::async_trait;

use catalog_core::ProductId;
use catalog_products::{
    DependentRecord, ImageRecord, ProductRecord, ReviewRecord, SortOrder, TagRecord,
};

use crate::error::StoreResult;

pub mod in_memory;
pub mod postgres;

pub use in_memory::{InMemoryDependentStore, InMemoryProductStore};
pub use postgres::PostgresCatalogStore;

/// Store for core product records.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Upsert by id and return the persisted record.
    async fn save(&self, record: ProductRecord) -> StoreResult<ProductRecord>;

    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<ProductRecord>>;

    async fn find_by_sku(&self, sku: &str) -> StoreResult<Option<ProductRecord>>;

    async fn find_by_category(&self, category: &str) -> StoreResult<Vec<ProductRecord>>;

    /// All records ordered by price (ties broken by id, in the same direction).
    async fn find_all_sorted(&self, order: SortOrder) -> StoreResult<Vec<ProductRecord>>;

    /// All records ordered by id.
    async fn find_all(&self) -> StoreResult<Vec<ProductRecord>>;
}

/// Store for records owned by a product (reviews, images, tags).
#[async_trait]
pub trait DependentStore<R: DependentRecord>: Send + Sync {
    async fn save(&self, record: R) -> StoreResult<R>;

    /// Records owned by `product_id`, in insertion order. Empty when there are none.
    async fn find_by_parent_id(&self, product_id: ProductId) -> StoreResult<Vec<R>>;
}

/// The four stores a product is spread across.
#[derive(Clone)]
pub struct CatalogStores {
    pub products: Arc<dyn ProductStore>,
    pub reviews: Arc<dyn DependentStore<ReviewRecord>>,
    pub images: Arc<dyn DependentStore<ImageRecord>>,
    pub tags: Arc<dyn DependentStore<TagRecord>>,
}

impl CatalogStores {
    /// Fresh, empty in-memory stores (tests/dev).
    pub fn in_memory() -> Self {
        Self {
            products: Arc::new(InMemoryProductStore::new()),
            reviews: Arc::new(InMemoryDependentStore::<ReviewRecord>::new()),
            images: Arc::new(InMemoryDependentStore::<ImageRecord>::new()),
            tags: Arc::new(InMemoryDependentStore::<TagRecord>::new()),
        }
    }

    /// All four stores backed by one Postgres pool.
    pub fn postgres(store: PostgresCatalogStore) -> Self {
        let store = Arc::new(store);
        Self {
            products: store.clone(),
            reviews: store.clone(),
            images: store.clone(),
            tags: store,
        }
    }
}
