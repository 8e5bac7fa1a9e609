//! Feed ingestion pipeline.
//!
//! ```text
//! fetch (retry + overall timeout)   failure: the whole run fails, nothing persisted
//!   ↓
//! for each entry:
//!   presence   → required key missing: reported with the other violations
//!   decode     → malformed: log, drop, next
//!   validate   → violations: log, drop, next
//!   decompose  → failure: log, count as failed, next
//!   ↓
//! IngestReport
//! ```

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{error, info};

use catalog_products::{Product, ProductValidator, Violation, missing_required};

use crate::decomposer::Decomposer;
use crate::error::{CatalogError, CatalogResult};
use crate::feed::{FeedSource, RetryPolicy};

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Entries in the fetched envelope.
    pub fetched: usize,
    pub persisted: usize,
    /// Malformed or invalid entries.
    pub dropped: usize,
    /// Valid entries whose decomposition failed.
    pub failed: usize,
}

pub struct FeedIngestionPipeline {
    source: Arc<dyn FeedSource>,
    validator: Arc<dyn ProductValidator>,
    decomposer: Arc<Decomposer>,
    retry: RetryPolicy,
}

impl FeedIngestionPipeline {
    pub fn new(
        source: Arc<dyn FeedSource>,
        validator: Arc<dyn ProductValidator>,
        decomposer: Arc<Decomposer>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            source,
            validator,
            decomposer,
            retry,
        }
    }

    pub async fn ingest(&self, url: &str) -> CatalogResult<IngestReport> {
        let envelope = self
            .retry
            .fetch_with_retry(self.source.as_ref(), url)
            .await
            .map_err(|e| {
                error!(url, error = %e, "feed fetch failed");
                CatalogError::service("Error loading products", e)
            })?;

        let mut report = IngestReport {
            fetched: envelope.products.len(),
            ..IngestReport::default()
        };

        for entry in envelope.products {
            let product = match self.accept(entry) {
                Ok(product) => product,
                Err((id, violations)) => {
                    error!(
                        product_id = %id,
                        violations = %Violation::join(&violations),
                        "validation failed for product"
                    );
                    report.dropped += 1;
                    continue;
                }
            };

            let id = product.id;
            match self.decomposer.decompose(&product).await {
                Ok(_) => report.persisted += 1,
                Err(e) => {
                    let err = CatalogError::service(format!("Error saving Product: {id}"), e);
                    error!(product_id = %id, error = %err, "failed to persist feed product");
                    report.failed += 1;
                }
            }
        }

        info!(
            url,
            fetched = report.fetched,
            persisted = report.persisted,
            dropped = report.dropped,
            failed = report.failed,
            "feed ingestion finished"
        );
        Ok(report)
    }

    /// Decode and validate one feed entry. On rejection returns an id hint for logging.
    fn accept(&self, entry: JsonValue) -> Result<Product, (String, Vec<Violation>)> {
        let id_hint = entry
            .get("id")
            .map(JsonValue::to_string)
            .unwrap_or_else(|| "?".to_string());

        let mut violations = missing_required(&entry);
        let product = match Product::from_value(entry) {
            Ok(product) => product,
            Err(e) => {
                violations.push(Violation::new("$", e.to_string()));
                return Err((id_hint, violations));
            }
        };

        violations.extend(self.validator.validate(&product));
        if violations.is_empty() {
            Ok(product)
        } else {
            Err((id_hint, violations))
        }
    }
}
