//! Product detail repository adapters.
//!
//! Both adapters implement `catalog_products::ProductDetailRepository`:
//! - `in_memory`: process-local store for tests/dev
//! - `postgres`: durable store over a `sqlx` connection pool

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductDetailRepository;
pub use postgres::PostgresProductDetailRepository;
