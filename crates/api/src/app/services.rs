use tracing::info;

use catalog_infra::{CatalogConfig, CatalogService, CatalogStores, PostgresCatalogStore, StoreResult};

/// Pick the store backend from config: Postgres when `DATABASE_URL` is set, otherwise
/// in-memory stores that live as long as the process.
pub async fn build_stores(config: &CatalogConfig) -> StoreResult<CatalogStores> {
    match &config.database_url {
        Some(url) => {
            let store = PostgresCatalogStore::connect(url).await?;
            info!("using postgres catalog stores");
            Ok(CatalogStores::postgres(store))
        }
        None => {
            info!("DATABASE_URL not set; using in-memory catalog stores");
            Ok(CatalogStores::in_memory())
        }
    }
}

pub async fn build_service(config: &CatalogConfig) -> StoreResult<CatalogService> {
    let stores = build_stores(config).await?;
    Ok(CatalogService::with_defaults(stores, config))
}
