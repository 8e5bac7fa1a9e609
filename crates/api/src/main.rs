use anyhow::Context;

use catalog_infra::CatalogConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalog_observability::init();

    let config = CatalogConfig::from_env();
    let service = catalog_api::app::services::build_service(&config)
        .await
        .context("failed to initialise catalog stores")?;

    let app = catalog_api::app::build_app(service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, feed_url = %config.feed_url, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
