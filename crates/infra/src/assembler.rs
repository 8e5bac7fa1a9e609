//! Read-side join of a core record with its dependent collections.

use std::sync::Arc;

use futures::{StreamExt, TryStreamExt, stream};
use tracing::debug;

use catalog_products::{ImageRecord, Product, ProductRecord, ReviewRecord, TagRecord};

use crate::error::StoreResult;
use crate::store::{CatalogStores, DependentStore};

/// Upper bound on products assembled at once by `assemble_all`.
pub const ASSEMBLE_CONCURRENCY: usize = 256;

/// Joins a core record with its reviews, images and tags.
///
/// The three dependent lookups are issued together and joined; the first failure fails
/// the whole assembly and the remaining lookups are dropped. Dropping the returned
/// future likewise stops lookups that have not started.
#[derive(Clone)]
pub struct Assembler {
    reviews: Arc<dyn DependentStore<ReviewRecord>>,
    images: Arc<dyn DependentStore<ImageRecord>>,
    tags: Arc<dyn DependentStore<TagRecord>>,
}

impl Assembler {
    pub fn new(stores: &CatalogStores) -> Self {
        Self {
            reviews: stores.reviews.clone(),
            images: stores.images.clone(),
            tags: stores.tags.clone(),
        }
    }

    pub async fn assemble(&self, record: ProductRecord) -> StoreResult<Product> {
        let id = record.id;
        let (reviews, images, tags) = tokio::try_join!(
            self.reviews.find_by_parent_id(id),
            self.images.find_by_parent_id(id),
            self.tags.find_by_parent_id(id),
        )?;

        debug!(
            product_id = %id,
            reviews = reviews.len(),
            images = images.len(),
            tags = tags.len(),
            "assembled product"
        );
        Ok(Product::from_parts(record, reviews, images, tags))
    }

    /// Assemble several records concurrently, preserving their order. At most
    /// `ASSEMBLE_CONCURRENCY` assemblies are in flight.
    pub async fn assemble_all(&self, records: Vec<ProductRecord>) -> StoreResult<Vec<Product>> {
        stream::iter(records)
            .map(|r| self.assemble(r))
            .buffered(ASSEMBLE_CONCURRENCY)
            .try_collect()
            .await
    }
}
