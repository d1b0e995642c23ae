use serde::{Deserialize, Deserializer, Serialize};

use catalog_core::{Entity, ProductDetailId, ProductId};

/// A descriptive key/description pair attached to a product.
///
/// `id` is `None` until the store assigns one. Many details may reference the
/// same product; the detail does not own the product's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductDetail {
    #[serde(default, deserialize_with = "unset_if_not_positive")]
    pub id: Option<ProductDetailId>,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub key: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub description: String,
    #[serde(default, deserialize_with = "unset_if_not_positive")]
    pub product: Option<ProductId>,
}

/// Clients send `0` (or `null`) for a reference that is not set.
fn unset_if_not_positive<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| T::try_from(raw).ok()))
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProductDetail {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            key: key.into(),
            description: description.into(),
            product: None,
        }
    }

    pub fn with_product(mut self, product: ProductId) -> Self {
        self.product = Some(product);
        self
    }

    /// Returns a copy carrying `id`, replacing any id already present.
    pub fn with_id(mut self, id: ProductDetailId) -> Self {
        self.id = Some(id);
        self
    }

    /// Case-insensitive substring match against `key` OR `description`.
    ///
    /// Folding uses Unicode lowercase mapping (`str::to_lowercase`). An empty
    /// keyword matches everything.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.key.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

impl Entity for ProductDetail {
    type Id = ProductDetailId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }
}
