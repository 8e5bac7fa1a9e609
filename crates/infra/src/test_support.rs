//! Shared fixtures and store doubles for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use catalog_core::ProductId;
use catalog_products::{
    DependentRecord, Dimensions, Metadata, Product, ProductRecord, Review, SortOrder, WriteMode,
};

use crate::error::{StoreError, StoreResult};
use crate::store::{DependentStore, ProductStore};

pub fn test_product(id: i64) -> Product {
    let at = Utc.with_ymd_and_hms(2024, 5, 23, 8, 56, 21).unwrap();
    Product {
        id: ProductId::new(id),
        title: format!("Widget {id}"),
        description: "A widget.".to_string(),
        category: "tools".to_string(),
        price: 9.99,
        discount_percentage: Some(5.0),
        rating: Some(4.5),
        stock: 3,
        tags: vec!["metal".to_string(), "small".to_string(), "blue".to_string()],
        brand: "Acme".to_string(),
        sku: format!("SKU-{id}"),
        weight: 1.5,
        dimensions: Dimensions { width: 1.0, height: 2.0, depth: 3.0 },
        warranty_information: "1 year".to_string(),
        shipping_information: "Ships fast".to_string(),
        availability_status: "In Stock".to_string(),
        reviews: vec![
            Review {
                rating: Some(4.0),
                comment: "Good".to_string(),
                date: at,
                reviewer_name: "Ann".to_string(),
                reviewer_email: "ann@example.com".to_string(),
            },
            Review {
                rating: Some(2.0),
                comment: "Meh".to_string(),
                date: at,
                reviewer_name: "Bo".to_string(),
                reviewer_email: "bo@example.com".to_string(),
            },
        ],
        return_policy: "30 days".to_string(),
        minimum_order_quantity: 1,
        meta: Metadata {
            created_at: at,
            updated_at: at,
            barcode: "123".to_string(),
            qr_code: "https://qr".to_string(),
        },
        images: vec!["https://img/1.png".to_string()],
        thumbnail: "https://img/t.png".to_string(),
    }
}

pub fn test_record(id: i64, category: &str, price: f64) -> ProductRecord {
    let mut product = test_product(id);
    product.category = category.to_string();
    product.price = price;
    let mut record = product.to_record();
    record.write_mode = WriteMode::Insert;
    record
}

/// Product store whose every call fails.
pub struct FailingProductStore;

#[async_trait]
impl ProductStore for FailingProductStore {
    async fn save(&self, _record: ProductRecord) -> StoreResult<ProductRecord> {
        Err(StoreError::backend("product store down"))
    }

    async fn find_by_id(&self, _id: ProductId) -> StoreResult<Option<ProductRecord>> {
        Err(StoreError::backend("product store down"))
    }

    async fn find_by_sku(&self, _sku: &str) -> StoreResult<Option<ProductRecord>> {
        Err(StoreError::backend("product store down"))
    }

    async fn find_by_category(&self, _category: &str) -> StoreResult<Vec<ProductRecord>> {
        Err(StoreError::backend("product store down"))
    }

    async fn find_all_sorted(&self, _order: SortOrder) -> StoreResult<Vec<ProductRecord>> {
        Err(StoreError::backend("product store down"))
    }

    async fn find_all(&self) -> StoreResult<Vec<ProductRecord>> {
        Err(StoreError::backend("product store down"))
    }
}

/// Dependent store that counts calls and fails all of them.
#[derive(Default)]
pub struct FailingDependentStore {
    pub calls: AtomicUsize,
}

#[async_trait]
impl<R: DependentRecord> DependentStore<R> for FailingDependentStore {
    async fn save(&self, _record: R) -> StoreResult<R> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::backend("dependent store down"))
    }

    async fn find_by_parent_id(&self, _product_id: ProductId) -> StoreResult<Vec<R>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::backend("dependent store down"))
    }
}

/// Wraps a dependent store and counts calls passing through it.
pub struct CountingStore<S> {
    pub inner: S,
    pub calls: Arc<AtomicUsize>,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl<R: DependentRecord, S: DependentStore<R>> DependentStore<R> for CountingStore<S> {
    async fn save(&self, record: R) -> StoreResult<R> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.save(record).await
    }

    async fn find_by_parent_id(&self, product_id: ProductId) -> StoreResult<Vec<R>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_parent_id(product_id).await
    }
}
