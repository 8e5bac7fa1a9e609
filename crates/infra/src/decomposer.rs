//! Write-side split of a product into its core record and dependent records.
//!
//! ```text
//! Product
//!   ↓
//! 1. Flatten into a core record
//!   ↓
//! 2. Classify the id (insert / update) and stamp the record
//!   ↓
//! 3. Save the core record            (failure: stop, nothing else written)
//!   ↓
//! 4. Stamp reviews/images/tags with the saved id
//!   ↓
//! 5. Save dependents, one branch per store, branches joined
//!   ↓
//! 6. Re-assemble from the stores
//! ```
//!
//! There is no transaction across the four stores. If a dependent branch fails, the
//! core record and whatever the other branches already wrote stay written.

use std::sync::Arc;

use tracing::{debug, warn};

use catalog_products::{DependentRecord, Product};

use crate::assembler::Assembler;
use crate::error::StoreResult;
use crate::identity::IdentityTracker;
use crate::store::{CatalogStores, DependentStore};

pub struct Decomposer {
    stores: CatalogStores,
    identity: Arc<dyn IdentityTracker>,
    assembler: Assembler,
}

impl Decomposer {
    pub fn new(stores: CatalogStores, identity: Arc<dyn IdentityTracker>) -> Self {
        let assembler = Assembler::new(&stores);
        Self {
            stores,
            identity,
            assembler,
        }
    }

    /// Persist `product` across the four stores and return the re-assembled view.
    pub async fn decompose(&self, product: &Product) -> StoreResult<Product> {
        let mut record = product.to_record();
        record.write_mode = self.identity.classify(record.id);
        debug!(
            product_id = %record.id,
            mode = record.write_mode.as_str(),
            "saving product"
        );

        let saved = self.stores.products.save(record).await?;
        let owner = saved.id;

        let saved_dependents = tokio::try_join!(
            save_all(self.stores.reviews.as_ref(), product.review_records(owner)),
            save_all(self.stores.images.as_ref(), product.image_records(owner)),
            save_all(self.stores.tags.as_ref(), product.tag_records(owner)),
        );
        if let Err(e) = saved_dependents {
            warn!(
                product_id = %owner,
                error = %e,
                "dependent write failed; records already written are kept"
            );
            return Err(e);
        }

        self.assembler.assemble(saved).await
    }
}

/// Save `records` into one store in order, stopping at the first failure.
async fn save_all<R: DependentRecord>(
    store: &dyn DependentStore<R>,
    records: Vec<R>,
) -> StoreResult<()> {
    for record in records {
        store.save(record).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use tokio::sync::Barrier;

    use catalog_core::ProductId;
    use catalog_products::{ProductRecord, ReviewRecord, SortOrder, WriteMode};

    use crate::identity::InMemoryIdentityTracker;
    use crate::store::{InMemoryDependentStore, InMemoryProductStore, ProductStore};
    use crate::test_support::{CountingStore, FailingDependentStore, FailingProductStore, test_product};

    fn decomposer(stores: &CatalogStores) -> Decomposer {
        Decomposer::new(stores.clone(), Arc::new(InMemoryIdentityTracker::new()))
    }

    #[tokio::test]
    async fn round_trip_reproduces_the_product() {
        let stores = CatalogStores::in_memory();
        let product = test_product(1);

        let saved = decomposer(&stores).decompose(&product).await.unwrap();
        assert_eq!(saved, product);

        let record = stores.products.find_by_id(ProductId::new(1)).await.unwrap().unwrap();
        let reassembled = Assembler::new(&stores).assemble(record).await.unwrap();
        assert_eq!(reassembled, saved);
    }

    #[tokio::test]
    async fn dependents_are_stamped_with_the_saved_id() {
        let stores = CatalogStores::in_memory();
        decomposer(&stores).decompose(&test_product(5)).await.unwrap();

        let reviews: Vec<ReviewRecord> = stores.reviews.find_by_parent_id(ProductId::new(5)).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.product_id == ProductId::new(5)));
    }

    /// Records the write mode of every saved core record.
    struct ModeRecordingStore {
        inner: InMemoryProductStore,
        modes: std::sync::Mutex<Vec<WriteMode>>,
    }

    #[async_trait::async_trait]
    impl ProductStore for ModeRecordingStore {
        async fn save(&self, record: ProductRecord) -> StoreResult<ProductRecord> {
            self.modes.lock().unwrap().push(record.write_mode);
            self.inner.save(record).await
        }
        async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<ProductRecord>> {
            self.inner.find_by_id(id).await
        }
        async fn find_by_sku(&self, sku: &str) -> StoreResult<Option<ProductRecord>> {
            self.inner.find_by_sku(sku).await
        }
        async fn find_by_category(&self, category: &str) -> StoreResult<Vec<ProductRecord>> {
            self.inner.find_by_category(category).await
        }
        async fn find_all_sorted(
            &self,
            order: SortOrder,
        ) -> StoreResult<Vec<ProductRecord>> {
            self.inner.find_all_sorted(order).await
        }
        async fn find_all(&self) -> StoreResult<Vec<ProductRecord>> {
            self.inner.find_all().await
        }
    }

    #[tokio::test]
    async fn second_save_of_an_id_is_an_update() {
        let recorder = Arc::new(ModeRecordingStore {
            inner: InMemoryProductStore::new(),
            modes: std::sync::Mutex::new(Vec::new()),
        });
        let stores = CatalogStores {
            products: recorder.clone(),
            ..CatalogStores::in_memory()
        };
        let decomposer = decomposer(&stores);

        decomposer.decompose(&test_product(1)).await.unwrap();
        decomposer.decompose(&test_product(2)).await.unwrap();
        decomposer.decompose(&test_product(1)).await.unwrap();

        assert_eq!(
            *recorder.modes.lock().unwrap(),
            vec![WriteMode::Insert, WriteMode::Insert, WriteMode::Update]
        );
    }

    #[tokio::test]
    async fn core_write_failure_skips_dependent_writes() {
        let reviews = CountingStore::new(InMemoryDependentStore::<ReviewRecord>::new());
        let review_calls = reviews.calls.clone();
        let stores = CatalogStores {
            products: Arc::new(FailingProductStore),
            reviews: Arc::new(reviews),
            ..CatalogStores::in_memory()
        };

        let err = decomposer(&stores).decompose(&test_product(1)).await.unwrap_err();
        assert!(err.to_string().contains("product store down"));
        assert_eq!(review_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dependent_failure_fails_without_rolling_back() {
        let failing_tags = Arc::new(FailingDependentStore::default());
        let stores = CatalogStores {
            tags: failing_tags.clone(),
            ..CatalogStores::in_memory()
        };

        let err = decomposer(&stores).decompose(&test_product(1)).await.unwrap_err();
        assert!(err.to_string().contains("dependent store down"));
        assert_eq!(failing_tags.calls.load(Ordering::SeqCst), 1);

        // Core record and the other branches stay written.
        assert!(stores.products.find_by_id(ProductId::new(1)).await.unwrap().is_some());
        let reviews: Vec<ReviewRecord> = stores.reviews.find_by_parent_id(ProductId::new(1)).await.unwrap();
        assert_eq!(reviews.len(), 2);
    }

    /// Holds every write until one write per store is in flight.
    struct BarrierStore {
        barrier: Arc<Barrier>,
    }

    #[async_trait::async_trait]
    impl<R: DependentRecord> DependentStore<R> for BarrierStore {
        async fn save(&self, record: R) -> StoreResult<R> {
            self.barrier.wait().await;
            Ok(record)
        }

        async fn find_by_parent_id(&self, _product_id: ProductId) -> StoreResult<Vec<R>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn dependent_stores_are_written_concurrently() {
        let barrier = Arc::new(Barrier::new(3));
        let stores = CatalogStores {
            reviews: Arc::new(BarrierStore { barrier: barrier.clone() }),
            images: Arc::new(BarrierStore { barrier: barrier.clone() }),
            tags: Arc::new(BarrierStore { barrier }),
            ..CatalogStores::in_memory()
        };
        let mut product = test_product(1);
        product.reviews.truncate(1);
        product.tags.truncate(1);
        assert_eq!(product.images.len(), 1);

        tokio::time::timeout(Duration::from_secs(1), decomposer(&stores).decompose(&product))
            .await
            .expect("dependent writes were serialized")
            .unwrap();
        assert!(stores.products.find_by_id(ProductId::new(1)).await.unwrap().is_some());
    }
}
