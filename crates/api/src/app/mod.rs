//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and catalog service construction
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: response envelope and error mapping

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use catalog_infra::CatalogService;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(service: CatalogService) -> Router {
    let service = Arc::new(service);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/products", routes::products::router())
        .layer(Extension(service))
}
