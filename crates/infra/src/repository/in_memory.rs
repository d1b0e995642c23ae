use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use catalog_core::ProductDetailId;
use catalog_products::{ProductDetail, ProductDetailRepository, RepositoryError, RepositoryResult};

/// In-memory product detail store.
///
/// Intended for tests/dev. Records are kept in id order, which is the
/// natural order returned by `find_all`.
#[derive(Debug)]
pub struct InMemoryProductDetailRepository {
    records: RwLock<BTreeMap<ProductDetailId, ProductDetail>>,
    next_id: AtomicI64,
}

impl InMemoryProductDetailRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn allocate_id(&self) -> RepositoryResult<ProductDetailId> {
        let raw = self.next_id.fetch_add(1, Ordering::SeqCst);
        ProductDetailId::new(raw).map_err(|e| RepositoryError::storage(e.to_string()))
    }

    fn poisoned() -> RepositoryError {
        RepositoryError::storage("lock poisoned")
    }
}

impl Default for InMemoryProductDetailRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductDetailRepository for InMemoryProductDetailRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<ProductDetail>> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.values().cloned().collect())
    }

    async fn find_by_keyword(&self, keyword: &str) -> RepositoryResult<Vec<ProductDetail>> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records
            .values()
            .filter(|d| d.matches_keyword(keyword))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: ProductDetailId) -> RepositoryResult<ProductDetail> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        records.get(&id).cloned().ok_or(RepositoryError::NotFound(id))
    }

    async fn exists_by_id(&self, id: ProductDetailId) -> RepositoryResult<bool> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.contains_key(&id))
    }

    async fn insert(&self, detail: ProductDetail) -> RepositoryResult<ProductDetail> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        let id = self.allocate_id()?;
        let stored = detail.with_id(id);
        records.insert(id, stored.clone());
        Ok(stored)
    }

    async fn replace(
        &self,
        id: ProductDetailId,
        detail: ProductDetail,
    ) -> RepositoryResult<ProductDetail> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        let slot = records.get_mut(&id).ok_or(RepositoryError::NotFound(id))?;
        *slot = detail.with_id(id);
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: ProductDetailId) -> RepositoryResult<()> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        records
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() {
        let repo = InMemoryProductDetailRepository::new();

        let first = repo.insert(ProductDetail::new("a", "")).await.unwrap();
        let first_id = first.id.unwrap();
        repo.delete_by_id(first_id).await.unwrap();
        let second = repo.insert(ProductDetail::new("b", "")).await.unwrap();

        assert!(second.id.unwrap() > first_id);
        assert!(!repo.is_empty());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn replace_and_delete_report_missing_records() {
        let repo = InMemoryProductDetailRepository::new();
        let id = ProductDetailId::new(42).unwrap();

        assert_eq!(
            repo.replace(id, ProductDetail::new("k", "d")).await,
            Err(RepositoryError::NotFound(id))
        );
        assert_eq!(repo.delete_by_id(id).await, Err(RepositoryError::NotFound(id)));
        assert_eq!(repo.find_by_id(id).await, Err(RepositoryError::NotFound(id)));
    }

    #[tokio::test]
    async fn find_all_returns_records_in_id_order() {
        let repo = InMemoryProductDetailRepository::new();
        for key in ["c", "a", "b"] {
            repo.insert(ProductDetail::new(key, "")).await.unwrap();
        }

        let keys: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.key)
            .collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn keyword_search_is_the_ordered_filter_of_find_all(
                keys in prop::collection::vec("[a-cA-C]{0,4}", 0..12),
                keyword in "[a-cA-C]{1,2}",
            ) {
                let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
                rt.block_on(async {
                    let repo = InMemoryProductDetailRepository::new();
                    for key in &keys {
                        repo.insert(ProductDetail::new(key.clone(), "")).await.unwrap();
                    }

                    let expected: Vec<_> = repo
                        .find_all()
                        .await
                        .unwrap()
                        .into_iter()
                        .filter(|d| d.key.to_lowercase().contains(&keyword.to_lowercase()))
                        .collect();
                    let found = repo.find_by_keyword(&keyword).await.unwrap();

                    prop_assert_eq!(found, expected);
                    Ok(())
                })?;
            }
        }
    }
}
