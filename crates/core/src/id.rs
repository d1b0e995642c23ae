//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are positive 64-bit integers allocated by the store.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a product detail record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ProductDetailId(i64);

/// Identifier of the owning product (managed by the product subsystem).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ProductId(i64);

macro_rules! impl_positive_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a raw value, rejecting zero and negative numbers.
            pub fn new(value: i64) -> DomainResult<Self> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(DomainError::invalid_id(format!(
                        "{}: must be positive, got {}",
                        $name, value
                    )))
                }
            }

            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl TryFrom<i64> for $t {
            type Error = DomainError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::new(raw)
            }
        }
    };
}

impl_positive_id!(ProductDetailId, "ProductDetailId");
impl_positive_id!(ProductId, "ProductId");

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_non_positive_values() {
        assert!(ProductDetailId::new(0).is_err());
        assert!(ProductDetailId::new(-5).is_err());
        assert_eq!(ProductDetailId::new(1).unwrap().get(), 1);
    }

    #[test]
    fn parse_reports_invalid_id() {
        let err = "abc".parse::<ProductDetailId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
        assert_eq!("42".parse::<ProductId>().unwrap().get(), 42);
    }

    #[test]
    fn serde_uses_bare_integer() {
        let id = ProductDetailId::new(7).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        assert!(serde_json::from_str::<ProductDetailId>("0").is_err());
    }

    proptest! {
        /// Property: every positive integer survives a Display/FromStr pass.
        #[test]
        fn display_parses_back(raw in 1i64..i64::MAX) {
            let id = ProductDetailId::new(raw).unwrap();
            prop_assert_eq!(id.to_string().parse::<ProductDetailId>().unwrap(), id);
        }
    }
}
