//! Product details domain module.
//!
//! This crate owns the product detail entity, the repository contract the
//! service persists through, and the service that classifies every failure
//! into an [`OperationError`]. No HTTP, no concrete storage.

pub mod error;
pub mod product_detail;
pub mod repository;
pub mod service;

pub use error::{ErrorCategory, OperationError, OperationResult};
pub use product_detail::ProductDetail;
pub use repository::{ProductDetailRepository, RepositoryError, RepositoryResult};
pub use service::ProductDetailService;
