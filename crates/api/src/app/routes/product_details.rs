use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection, rejection::QueryRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use catalog_core::ProductDetailId;
use catalog_products::{ProductDetail, ProductDetailService};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(search_product_details).post(create_product_detail))
        .route(
            "/:id",
            get(retrieve_product_detail)
                .put(update_product_detail)
                .delete(delete_product_detail),
        )
}

/// An id that does not parse as a positive integer is treated as absent.
fn parse_id(raw: &str) -> Option<ProductDetailId> {
    match raw.parse::<ProductDetailId>() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(raw, error = %e, "ignoring malformed product detail id");
            None
        }
    }
}

/// A missing or undecodable body is treated as an absent product.
fn payload(body: Result<Json<ProductDetail>, JsonRejection>) -> Option<ProductDetail> {
    match body {
        Ok(Json(product)) => Some(product),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "ignoring unreadable product detail body");
            None
        }
    }
}

pub async fn search_product_details(
    Extension(service): Extension<ProductDetailService>,
    params: Result<Query<dto::SearchParams>, QueryRejection>,
) -> axum::response::Response {
    tracing::info!("processing search request");

    let Ok(Query(params)) = params else {
        return errors::bad_request();
    };

    match service.search(params.keyword.as_deref()).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::operation_error_to_response("search", e),
    }
}

pub async fn create_product_detail(
    Extension(service): Extension<ProductDetailService>,
    body: Result<Json<ProductDetail>, JsonRejection>,
) -> axum::response::Response {
    tracing::info!("processing create request");

    let created = match service.create(payload(body)).await {
        Ok(created) => created,
        Err(e) => return errors::operation_error_to_response("create", e),
    };

    let Some(id) = created.id else {
        tracing::error!("store returned a product detail without an id");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/products/{id}"))],
    )
        .into_response()
}

pub async fn retrieve_product_detail(
    Extension(service): Extension<ProductDetailService>,
    Path(id): Path<String>,
) -> axum::response::Response {
    tracing::info!("processing retrieve request");

    match service.retrieve(parse_id(&id)).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => errors::operation_error_to_response("retrieve", e),
    }
}

pub async fn update_product_detail(
    Extension(service): Extension<ProductDetailService>,
    Path(id): Path<String>,
    body: Result<Json<ProductDetail>, JsonRejection>,
) -> axum::response::Response {
    tracing::info!("processing update request");

    match service.update(parse_id(&id), payload(body)).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => errors::operation_error_to_response("update", e),
    }
}

pub async fn delete_product_detail(
    Extension(service): Extension<ProductDetailService>,
    Path(id): Path<String>,
) -> axum::response::Response {
    tracing::info!("processing delete request");

    match service.delete(parse_id(&id)).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => errors::operation_error_to_response("delete", e),
    }
}
