use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use tracing::info;

use catalog_core::ProductId;
use catalog_infra::CatalogService;

use crate::app::errors;

const PRODUCTS_FETCHED: &str = "Products fetched successfully";
const PRODUCT_FETCHED: &str = "Product fetched successfully";
const PRODUCTS_LOADED: &str = "Products loaded successfully";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/load", post(load_products))
        .route("/sku/:sku", get(get_product_by_sku))
        .route("/category/:category", get(list_by_category))
        .route("/sort/:order", get(list_sorted_by_price))
        .route("/:id", get(get_product))
}

pub async fn list_products(Extension(service): Extension<Arc<CatalogService>>) -> Response {
    info!("get products endpoint called");
    match service.find_all().await {
        Ok(products) => errors::success(StatusCode::OK, PRODUCTS_FETCHED, products),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(id): Path<String>,
) -> Response {
    info!(id = %id, "get product by id endpoint called");
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, format!("invalid product id: {id}")),
    };
    match service.find_by_id(id).await {
        Ok(product) => errors::success(StatusCode::OK, PRODUCT_FETCHED, product),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn get_product_by_sku(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(sku): Path<String>,
) -> Response {
    info!(sku = %sku, "get product by sku endpoint called");
    match service.find_by_sku(&sku).await {
        Ok(product) => errors::success(StatusCode::OK, PRODUCT_FETCHED, product),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn list_by_category(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(category): Path<String>,
) -> Response {
    info!(category = %category, "get products by category endpoint called");
    match service.find_by_category(&category).await {
        Ok(products) => errors::success(StatusCode::OK, PRODUCT_FETCHED, products),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn list_sorted_by_price(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(order): Path<String>,
) -> Response {
    info!(order = %order, "get products sorted by price endpoint called");
    match service.find_all_sorted(&order).await {
        Ok(products) => errors::success(StatusCode::OK, PRODUCTS_FETCHED, products),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn load_products(Extension(service): Extension<Arc<CatalogService>>) -> Response {
    info!("load products endpoint called");
    match service.load_products().await {
        Ok(report) => errors::success(StatusCode::OK, PRODUCTS_LOADED, report),
        Err(e) => errors::catalog_error_to_response(e),
    }
}
