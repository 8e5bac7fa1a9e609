use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use catalog_infra::CatalogError;

/// Response body shared by every endpoint: `{status, message, data?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn success<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    (
        status,
        Json(Envelope {
            status: status.as_u16(),
            message: message.to_string(),
            data: Some(data),
        }),
    )
        .into_response()
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(Envelope::<()> {
            status: status.as_u16(),
            message: message.into(),
            data: None,
        }),
    )
        .into_response()
}

/// NotFound → 404 with its message; Service → 500 with the operation context only.
pub fn catalog_error_to_response(err: CatalogError) -> Response {
    match err {
        CatalogError::NotFound(message) => json_error(StatusCode::NOT_FOUND, message),
        CatalogError::Service { context, source } => {
            error!(error = %source, "{context}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, context)
        }
    }
}
