//! Translation of classified failures into HTTP responses.
//!
//! | Category | Status |
//! |----------|--------|
//! | none (request rejected before the service) | 400 |
//! | `*_OPERATION_ERROR` | 500 |
//! | `PRODUCT_NOT_FOUND_ERROR` | 404 |
//! | `INVALID_PARAMETER_ERROR` | 400 |
//!
//! Only the category code is written to the body; the wrapped cause is
//! logged and dropped here.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_products::{ErrorCategory, OperationError};

pub fn status_for(category: Option<ErrorCategory>) -> StatusCode {
    match category {
        None => StatusCode::BAD_REQUEST,
        Some(
            ErrorCategory::SearchOperation
            | ErrorCategory::CreateOperation
            | ErrorCategory::RetrieveOperation
            | ErrorCategory::UpdateOperation
            | ErrorCategory::DeleteOperation,
        ) => StatusCode::INTERNAL_SERVER_ERROR,
        Some(ErrorCategory::ProductNotFound) => StatusCode::NOT_FOUND,
        Some(ErrorCategory::InvalidParameter) => StatusCode::BAD_REQUEST,
    }
}

pub fn operation_error_to_response(
    operation: &'static str,
    err: OperationError,
) -> axum::response::Response {
    let category = err.category();
    match err.cause() {
        Some(cause) => tracing::error!(
            operation,
            category = %category,
            error = %cause,
            "error processing {operation} request"
        ),
        None => tracing::error!(
            operation,
            category = %category,
            "error processing {operation} request"
        ),
    }

    json_error(status_for(Some(category)), category.code())
}

/// Response for requests that never reached the service.
pub fn bad_request() -> axum::response::Response {
    json_error(status_for(None), "BAD_REQUEST")
}

pub fn json_error(status: StatusCode, code: &'static str) -> axum::response::Response {
    (status, axum::Json(json!({ "error": code }))).into_response()
}
