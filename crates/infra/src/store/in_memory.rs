use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use catalog_core::ProductId;
use catalog_products::{DependentRecord, ProductRecord, SortOrder};

use super::{DependentStore, ProductStore};
use crate::error::{StoreError, StoreResult};

fn poisoned() -> StoreError {
    StoreError::backend("lock poisoned")
}

/// In-memory core product store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<BTreeMap<ProductId, ProductRecord>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> StoreResult<Vec<ProductRecord>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn save(&self, record: ProductRecord) -> StoreResult<ProductRecord> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<ProductRecord>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    async fn find_by_sku(&self, sku: &str) -> StoreResult<Option<ProductRecord>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().find(|r| r.sku == sku).cloned())
    }

    async fn find_by_category(&self, category: &str) -> StoreResult<Vec<ProductRecord>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().filter(|r| r.category == category).cloned().collect())
    }

    async fn find_all_sorted(&self, order: SortOrder) -> StoreResult<Vec<ProductRecord>> {
        let mut records = self.snapshot()?;
        records.sort_by(|a, b| a.price.total_cmp(&b.price).then(a.id.cmp(&b.id)));
        if order == SortOrder::Desc {
            records.reverse();
        }
        Ok(records)
    }

    async fn find_all(&self) -> StoreResult<Vec<ProductRecord>> {
        self.snapshot()
    }
}

/// In-memory dependent store (reviews, images or tags) for tests/dev.
#[derive(Debug)]
pub struct InMemoryDependentStore<R> {
    inner: RwLock<Vec<R>>,
}

impl<R> InMemoryDependentStore<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl<R> Default for InMemoryDependentStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: DependentRecord> DependentStore<R> for InMemoryDependentStore<R> {
    async fn save(&self, record: R) -> StoreResult<R> {
        let mut records = self.inner.write().map_err(|_| poisoned())?;
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_parent_id(&self, product_id: ProductId) -> StoreResult<Vec<R>> {
        let records = self.inner.read().map_err(|_| poisoned())?;
        Ok(records
            .iter()
            .filter(|r| r.product_id() == product_id)
            .cloned()
            .collect())
    }
}
