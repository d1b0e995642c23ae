use axum::Router;

pub mod product_details;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new().nest("/products", product_details::router())
}
