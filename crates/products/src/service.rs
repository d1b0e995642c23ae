//! Product detail use cases.
//!
//! Each operation validates its inputs, delegates to the repository and
//! classifies any failure into exactly one [`ErrorCategory`]:
//!
//! | Operation | Absent input | Missing record | Repository failure |
//! |-----------|--------------|----------------|--------------------|
//! | search    | n/a          | n/a            | `SearchOperation`  |
//! | create    | `InvalidParameter` | n/a      | `CreateOperation`  |
//! | retrieve  | `InvalidParameter` | `RetrieveOperation` | `RetrieveOperation` |
//! | update    | `InvalidParameter` | `ProductNotFound`   | `RetrieveOperation` |
//! | delete    | `InvalidParameter` | `ProductNotFound`   | `DeleteOperation`   |
//!
//! Retrieve does not probe for existence, so a missing record surfaces as a
//! repository `NotFound` and is classified like any other retrieve failure.
//! Update and delete probe first; a record removed between the probe and the
//! write is reported by the write and classified as a backend failure.

use std::sync::Arc;

use catalog_core::ProductDetailId;

use crate::error::{ErrorCategory, OperationError, OperationResult};
use crate::product_detail::ProductDetail;
use crate::repository::{ProductDetailRepository, RepositoryError};

/// Service over a shared repository. Cheap to clone.
#[derive(Clone)]
pub struct ProductDetailService {
    repository: Arc<dyn ProductDetailRepository>,
}

impl ProductDetailService {
    pub fn new(repository: Arc<dyn ProductDetailRepository>) -> Self {
        Self { repository }
    }

    /// List every record, or those whose key or description contains `keyword`.
    pub async fn search(&self, keyword: Option<&str>) -> OperationResult<Vec<ProductDetail>> {
        tracing::info!(keyword = ?keyword, "searching product details");

        let result = match keyword.filter(|k| !k.is_empty()) {
            None => {
                tracing::debug!("no keyword specified, listing all product details");
                self.repository.find_all().await
            }
            Some(keyword) => {
                tracing::debug!("finding product details by key or description");
                self.repository.find_by_keyword(keyword).await
            }
        };

        result.map_err(classify(ErrorCategory::SearchOperation))
    }

    pub async fn create(&self, product: Option<ProductDetail>) -> OperationResult<ProductDetail> {
        tracing::info!(product = ?product, "creating product detail");

        let Some(mut product) = product else {
            tracing::error!("invalid product detail: none supplied");
            return Err(OperationError::invalid_parameter());
        };
        product.id = None;

        self.repository
            .insert(product)
            .await
            .map_err(classify(ErrorCategory::CreateOperation))
    }

    pub async fn retrieve(&self, id: Option<ProductDetailId>) -> OperationResult<ProductDetail> {
        tracing::info!(id = ?id, "retrieving product detail");

        let Some(id) = id else {
            tracing::error!("invalid id: none supplied");
            return Err(OperationError::invalid_parameter());
        };

        self.repository
            .find_by_id(id)
            .await
            .map_err(classify(ErrorCategory::RetrieveOperation))
    }

    /// Replace the record under `id` with `product` (no field merge).
    pub async fn update(
        &self,
        id: Option<ProductDetailId>,
        product: Option<ProductDetail>,
    ) -> OperationResult<ProductDetail> {
        tracing::info!(id = ?id, product = ?product, "updating product detail");

        let (Some(id), Some(product)) = (id, product) else {
            tracing::error!("invalid id or product detail: none supplied");
            return Err(OperationError::invalid_parameter());
        };

        self.ensure_exists(id, ErrorCategory::RetrieveOperation)
            .await?;

        self.repository
            .replace(id, product.with_id(id))
            .await
            .map_err(classify(ErrorCategory::RetrieveOperation))
    }

    pub async fn delete(&self, id: Option<ProductDetailId>) -> OperationResult<()> {
        tracing::info!(id = ?id, "deleting product detail");

        let Some(id) = id else {
            tracing::error!("invalid id: none supplied");
            return Err(OperationError::invalid_parameter());
        };

        self.ensure_exists(id, ErrorCategory::DeleteOperation).await?;

        self.repository
            .delete_by_id(id)
            .await
            .map_err(classify(ErrorCategory::DeleteOperation))
    }

    /// Existence probe run before update/delete. A failing probe is a backend
    /// failure of the calling operation, not a not-found.
    async fn ensure_exists(
        &self,
        id: ProductDetailId,
        on_failure: ErrorCategory,
    ) -> OperationResult<()> {
        let exists = self
            .repository
            .exists_by_id(id)
            .await
            .map_err(classify(on_failure))?;

        if exists {
            Ok(())
        } else {
            tracing::debug!(%id, "product detail not found");
            Err(OperationError::not_found())
        }
    }
}

/// Wrap a repository failure into an operational error of `category`, logging
/// the cause (it never crosses the transport boundary).
fn classify(category: ErrorCategory) -> impl FnOnce(RepositoryError) -> OperationError {
    move |cause| {
        tracing::error!(category = %category, error = %cause, "product detail operation failed");
        OperationError::operation(category, cause)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::repository::RepositoryResult;

    fn id(raw: i64) -> ProductDetailId {
        ProductDetailId::new(raw).unwrap()
    }

    fn boom() -> RepositoryError {
        RepositoryError::storage("backend unavailable")
    }

    /// Repository double with a scripted outcome per call, recording mutations.
    #[derive(Default)]
    struct ScriptedRepository {
        fail_reads: bool,
        fail_probe: bool,
        fail_writes: bool,
        exists: bool,
        /// Simulates a concurrent delete landing between probe and write.
        vanish_before_write: bool,
        mutations: Mutex<Vec<&'static str>>,
    }

    impl ScriptedRepository {
        fn mutations(&self) -> Vec<&'static str> {
            self.mutations.lock().unwrap().clone()
        }

        fn record(&self, op: &'static str) {
            self.mutations.lock().unwrap().push(op);
        }

        fn write_outcome(&self, id: ProductDetailId) -> RepositoryResult<()> {
            if self.fail_writes {
                Err(boom())
            } else if self.vanish_before_write {
                Err(RepositoryError::NotFound(id))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ProductDetailRepository for ScriptedRepository {
        async fn find_all(&self) -> RepositoryResult<Vec<ProductDetail>> {
            if self.fail_reads {
                return Err(boom());
            }
            Ok(vec![ProductDetail::new("a", "all")])
        }

        async fn find_by_keyword(&self, keyword: &str) -> RepositoryResult<Vec<ProductDetail>> {
            if self.fail_reads {
                return Err(boom());
            }
            Ok(vec![ProductDetail::new(keyword, "filtered")])
        }

        async fn find_by_id(&self, id: ProductDetailId) -> RepositoryResult<ProductDetail> {
            if self.fail_reads {
                return Err(boom());
            }
            if !self.exists {
                return Err(RepositoryError::NotFound(id));
            }
            Ok(ProductDetail::new("k", "d").with_id(id))
        }

        async fn exists_by_id(&self, _id: ProductDetailId) -> RepositoryResult<bool> {
            if self.fail_probe {
                return Err(boom());
            }
            Ok(self.exists)
        }

        async fn insert(&self, detail: ProductDetail) -> RepositoryResult<ProductDetail> {
            self.record("insert");
            if self.fail_writes {
                return Err(boom());
            }
            Ok(detail.with_id(id(1)))
        }

        async fn replace(
            &self,
            id: ProductDetailId,
            detail: ProductDetail,
        ) -> RepositoryResult<ProductDetail> {
            self.record("replace");
            self.write_outcome(id)?;
            Ok(detail)
        }

        async fn delete_by_id(&self, id: ProductDetailId) -> RepositoryResult<()> {
            self.record("delete");
            self.write_outcome(id)
        }
    }

    fn service(repo: ScriptedRepository) -> (ProductDetailService, Arc<ScriptedRepository>) {
        let repo = Arc::new(repo);
        (ProductDetailService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn search_without_keyword_lists_all() {
        let (svc, _) = service(ScriptedRepository::default());

        let none = svc.search(None).await.unwrap();
        let empty = svc.search(Some("")).await.unwrap();

        assert_eq!(none, empty);
        assert_eq!(none[0].description, "all");
    }

    #[tokio::test]
    async fn search_with_keyword_filters() {
        let (svc, _) = service(ScriptedRepository::default());
        let found = svc.search(Some("foo")).await.unwrap();
        assert_eq!(found[0].key, "foo");
        assert_eq!(found[0].description, "filtered");
    }

    #[tokio::test]
    async fn search_failure_is_search_operation_error() {
        let (svc, _) = service(ScriptedRepository {
            fail_reads: true,
            ..Default::default()
        });

        let err = svc.search(Some("x")).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::SearchOperation);
        assert_eq!(err.cause(), Some(&boom()));
    }

    #[tokio::test]
    async fn absent_inputs_are_invalid_parameters_without_mutation() {
        let (svc, repo) = service(ScriptedRepository {
            exists: true,
            ..Default::default()
        });
        let product = || Some(ProductDetail::new("k", "d"));

        let results = [
            svc.create(None).await.map(|_| ()),
            svc.retrieve(None).await.map(|_| ()),
            svc.update(None, product()).await.map(|_| ()),
            svc.update(Some(id(1)), None).await.map(|_| ()),
            svc.update(None, None).await.map(|_| ()),
            svc.delete(None).await,
        ];

        for result in results {
            let err = result.unwrap_err();
            assert_eq!(err.category(), ErrorCategory::InvalidParameter);
            assert!(err.cause().is_none());
        }
        assert!(repo.mutations().is_empty());
    }

    #[tokio::test]
    async fn create_discards_caller_supplied_id() {
        let (svc, _) = service(ScriptedRepository::default());
        let created = svc
            .create(Some(ProductDetail::new("k", "d").with_id(id(99))))
            .await
            .unwrap();
        assert_eq!(created.id, Some(id(1)));
    }

    #[tokio::test]
    async fn create_failure_is_create_operation_error() {
        let (svc, _) = service(ScriptedRepository {
            fail_writes: true,
            ..Default::default()
        });
        let err = svc
            .create(Some(ProductDetail::new("k", "d")))
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::CreateOperation);
        assert!(err.cause().is_some());
    }

    #[tokio::test]
    async fn retrieve_missing_record_is_retrieve_operation_error() {
        let (svc, _) = service(ScriptedRepository::default());
        let err = svc.retrieve(Some(id(5))).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::RetrieveOperation);
        assert_eq!(err.cause(), Some(&RepositoryError::NotFound(id(5))));
    }

    #[tokio::test]
    async fn retrieve_backend_failure_is_retrieve_operation_error() {
        let (svc, _) = service(ScriptedRepository {
            fail_reads: true,
            exists: true,
            ..Default::default()
        });
        let err = svc.retrieve(Some(id(5))).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::RetrieveOperation);
        assert_eq!(err.cause(), Some(&boom()));
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_record_are_not_found() {
        let (svc, repo) = service(ScriptedRepository::default());

        let err = svc
            .update(Some(id(3)), Some(ProductDetail::new("k", "d")))
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ProductNotFound);
        assert!(err.cause().is_none());

        let err = svc.delete(Some(id(3))).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ProductNotFound);
        assert!(err.cause().is_none());

        assert!(repo.mutations().is_empty());
    }

    #[tokio::test]
    async fn update_uses_path_id_over_payload_id() {
        let (svc, _) = service(ScriptedRepository {
            exists: true,
            ..Default::default()
        });
        let updated = svc
            .update(Some(id(4)), Some(ProductDetail::new("B", "d2").with_id(id(77))))
            .await
            .unwrap();
        assert_eq!(updated, ProductDetail::new("B", "d2").with_id(id(4)));
    }

    #[tokio::test]
    async fn update_failures_are_retrieve_operation_errors() {
        for repo in [
            ScriptedRepository {
                exists: true,
                fail_writes: true,
                ..Default::default()
            },
            ScriptedRepository {
                fail_probe: true,
                ..Default::default()
            },
        ] {
            let (svc, _) = service(repo);
            let err = svc
                .update(Some(id(2)), Some(ProductDetail::new("k", "d")))
                .await
                .unwrap_err();
            assert_eq!(err.category(), ErrorCategory::RetrieveOperation);
            assert_eq!(err.cause(), Some(&boom()));
        }
    }

    #[tokio::test]
    async fn delete_failures_are_delete_operation_errors() {
        for repo in [
            ScriptedRepository {
                exists: true,
                fail_writes: true,
                ..Default::default()
            },
            ScriptedRepository {
                fail_probe: true,
                ..Default::default()
            },
        ] {
            let (svc, _) = service(repo);
            let err = svc.delete(Some(id(2))).await.unwrap_err();
            assert_eq!(err.category(), ErrorCategory::DeleteOperation);
            assert_eq!(err.cause(), Some(&boom()));
        }
    }

    #[tokio::test]
    async fn record_vanishing_after_probe_is_a_backend_failure() {
        let racing = || ScriptedRepository {
            exists: true,
            vanish_before_write: true,
            ..Default::default()
        };

        let (svc, repo) = service(racing());
        let err = svc
            .update(Some(id(8)), Some(ProductDetail::new("k", "d")))
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::RetrieveOperation);
        assert_eq!(err.cause(), Some(&RepositoryError::NotFound(id(8))));
        assert_eq!(repo.mutations(), vec!["replace"]);

        let (svc, repo) = service(racing());
        let err = svc.delete(Some(id(8))).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::DeleteOperation);
        assert_eq!(repo.mutations(), vec!["delete"]);
    }
}
