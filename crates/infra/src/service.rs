//! Catalog query and command facade used by the HTTP layer.
//!
//! Every query is: store lookup → NotFound when nothing matched → assemble. Store and
//! assembly failures are wrapped as service errors naming the operation and key.

use std::sync::Arc;

use tracing::info;

use catalog_core::ProductId;
use catalog_products::{Product, ProductValidator, RuleValidator, SortOrder};

use crate::assembler::Assembler;
use crate::config::{CatalogConfig, EmptyCategoryPolicy};
use crate::decomposer::Decomposer;
use crate::error::{CatalogError, CatalogResult};
use crate::feed::{FeedSource, HttpFeedSource};
use crate::identity::{IdentityTracker, InMemoryIdentityTracker};
use crate::ingestion::{FeedIngestionPipeline, IngestReport};
use crate::store::{CatalogStores, ProductStore};

pub struct CatalogService {
    products: Arc<dyn ProductStore>,
    assembler: Assembler,
    decomposer: Arc<Decomposer>,
    pipeline: FeedIngestionPipeline,
    feed_url: String,
    empty_category: EmptyCategoryPolicy,
}

impl CatalogService {
    pub fn new(
        stores: CatalogStores,
        identity: Arc<dyn IdentityTracker>,
        source: Arc<dyn FeedSource>,
        validator: Arc<dyn ProductValidator>,
        config: &CatalogConfig,
    ) -> Self {
        let assembler = Assembler::new(&stores);
        let decomposer = Arc::new(Decomposer::new(stores.clone(), identity));
        let pipeline = FeedIngestionPipeline::new(source, validator, decomposer.clone(), config.retry);
        Self {
            products: stores.products,
            assembler,
            decomposer,
            pipeline,
            feed_url: config.feed_url.clone(),
            empty_category: config.empty_category,
        }
    }

    /// Default collaborators: process-local identity tracking, HTTP feed, default rules.
    pub fn with_defaults(stores: CatalogStores, config: &CatalogConfig) -> Self {
        Self::new(
            stores,
            Arc::new(InMemoryIdentityTracker::new()),
            Arc::new(HttpFeedSource::new()),
            Arc::new(RuleValidator::new()),
            config,
        )
    }

    /// Every product. An empty catalog is an empty list.
    pub async fn find_all(&self) -> CatalogResult<Vec<Product>> {
        let context = || "Error retrieving Products".to_string();
        let records = self
            .products
            .find_all()
            .await
            .map_err(|e| CatalogError::service(context(), e))?;
        let products = self
            .assembler
            .assemble_all(records)
            .await
            .map_err(|e| CatalogError::service(context(), e))?;

        info!(count = products.len(), "retrieved products");
        Ok(products)
    }

    pub async fn find_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        let context = || format!("Error retrieving Product by ID: {id}");
        let record = self
            .products
            .find_by_id(id)
            .await
            .map_err(|e| CatalogError::service(context(), e))?
            .ok_or_else(|| CatalogError::not_found(format!("product does not exist with id: {id}")))?;
        let product = self
            .assembler
            .assemble(record)
            .await
            .map_err(|e| CatalogError::service(context(), e))?;

        info!(product_id = %id, "retrieved product by id");
        Ok(product)
    }

    pub async fn find_by_sku(&self, sku: &str) -> CatalogResult<Product> {
        let context = || format!("Error retrieving Product by SKU: {sku}");
        let record = self
            .products
            .find_by_sku(sku)
            .await
            .map_err(|e| CatalogError::service(context(), e))?
            .ok_or_else(|| CatalogError::not_found(format!("product does not exist with sku: {sku}")))?;
        let product = self
            .assembler
            .assemble(record)
            .await
            .map_err(|e| CatalogError::service(context(), e))?;

        info!(sku, "retrieved product by sku");
        Ok(product)
    }

    /// Products in `category`. Zero matches is NotFound or an empty list depending on
    /// the configured [`EmptyCategoryPolicy`].
    pub async fn find_by_category(&self, category: &str) -> CatalogResult<Vec<Product>> {
        let context = || format!("Error retrieving Products by Category: {category}");
        let records = self
            .products
            .find_by_category(category)
            .await
            .map_err(|e| CatalogError::service(context(), e))?;

        if records.is_empty() && self.empty_category == EmptyCategoryPolicy::NotFound {
            return Err(CatalogError::not_found(format!(
                "No products found in category {category}"
            )));
        }

        let products = self
            .assembler
            .assemble_all(records)
            .await
            .map_err(|e| CatalogError::service(context(), e))?;

        info!(category, count = products.len(), "retrieved products by category");
        Ok(products)
    }

    /// All products ordered by price. `order` is a direction token; anything other
    /// than `asc` (any case) sorts descending.
    pub async fn find_all_sorted(&self, order: &str) -> CatalogResult<Vec<Product>> {
        let context = || format!("Error retrieving Products sorted by Price{order}");
        let direction = SortOrder::from_token(order);
        let records = self
            .products
            .find_all_sorted(direction)
            .await
            .map_err(|e| CatalogError::service(context(), e))?;
        let products = self
            .assembler
            .assemble_all(records)
            .await
            .map_err(|e| CatalogError::service(context(), e))?;

        info!(order = direction.as_str(), count = products.len(), "retrieved products sorted by price");
        Ok(products)
    }

    /// Persist one product outside the feed and return the stored view.
    pub async fn save_product(&self, product: &Product) -> CatalogResult<Product> {
        let id = product.id;
        let saved = self
            .decomposer
            .decompose(product)
            .await
            .map_err(|e| CatalogError::service(format!("Error saving Product: {id}"), e))?;

        info!(product_id = %id, "saved product");
        Ok(saved)
    }

    /// Run the feed ingestion pipeline against the configured feed URL.
    pub async fn load_products(&self) -> CatalogResult<IngestReport> {
        info!(url = %self.feed_url, "loading products");
        self.pipeline.ingest(&self.feed_url).await
    }
}
