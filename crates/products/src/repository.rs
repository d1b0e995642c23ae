//! Persistence contract for product details.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::ProductDetailId;

use crate::product_detail::ProductDetail;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository operation error.
///
/// These are the only failure signals a repository may raise. The service
/// layer classifies them; callers above the service never see them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No record exists for the given id.
    #[error("product detail not found: {0}")]
    NotFound(ProductDetailId),

    /// The backend failed (connection, query, poisoned lock, timeout).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Capability set over stored product details, keyed by [`ProductDetailId`].
///
/// ## Implementation Requirements
///
/// - `insert` ignores any id carried by the record and assigns a fresh one
///   from a sequence that never reuses values.
/// - `replace` overwrites the whole record (no field merge) and reports
///   `NotFound` when nothing was stored under `id`.
/// - `delete_by_id` reports `NotFound` when nothing was removed.
/// - `find_by_keyword` matches `key` OR `description`, case-insensitively.
#[async_trait]
pub trait ProductDetailRepository: Send + Sync {
    /// All records in the store's natural order.
    async fn find_all(&self) -> RepositoryResult<Vec<ProductDetail>>;

    /// Records whose key or description contains `keyword` (case-insensitive).
    async fn find_by_keyword(&self, keyword: &str) -> RepositoryResult<Vec<ProductDetail>>;

    async fn find_by_id(&self, id: ProductDetailId) -> RepositoryResult<ProductDetail>;

    async fn exists_by_id(&self, id: ProductDetailId) -> RepositoryResult<bool>;

    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, detail: ProductDetail) -> RepositoryResult<ProductDetail>;

    /// Replace the record stored under `id` and return the stored value.
    async fn replace(
        &self,
        id: ProductDetailId,
        detail: ProductDetail,
    ) -> RepositoryResult<ProductDetail>;

    async fn delete_by_id(&self, id: ProductDetailId) -> RepositoryResult<()>;
}

#[async_trait]
impl<R> ProductDetailRepository for Arc<R>
where
    R: ProductDetailRepository + ?Sized,
{
    async fn find_all(&self) -> RepositoryResult<Vec<ProductDetail>> {
        (**self).find_all().await
    }

    async fn find_by_keyword(&self, keyword: &str) -> RepositoryResult<Vec<ProductDetail>> {
        (**self).find_by_keyword(keyword).await
    }

    async fn find_by_id(&self, id: ProductDetailId) -> RepositoryResult<ProductDetail> {
        (**self).find_by_id(id).await
    }

    async fn exists_by_id(&self, id: ProductDetailId) -> RepositoryResult<bool> {
        (**self).exists_by_id(id).await
    }

    async fn insert(&self, detail: ProductDetail) -> RepositoryResult<ProductDetail> {
        (**self).insert(detail).await
    }

    async fn replace(
        &self,
        id: ProductDetailId,
        detail: ProductDetail,
    ) -> RepositoryResult<ProductDetail> {
        (**self).replace(id, detail).await
    }

    async fn delete_by_id(&self, id: ProductDetailId) -> RepositoryResult<()> {
        (**self).delete_by_id(id).await
    }
}
