//! Failure classification for product detail operations.
//!
//! Every failure leaving [`crate::ProductDetailService`] is an
//! [`OperationError`] tagged with exactly one [`ErrorCategory`]. The transport
//! layer maps categories to status codes and never looks at the cause.

use thiserror::Error;

use crate::repository::RepositoryError;

pub type OperationResult<T> = Result<T, OperationError>;

/// Closed set of failure categories.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    SearchOperation,
    CreateOperation,
    RetrieveOperation,
    /// Reserved: update write failures are reported as `RetrieveOperation`.
    UpdateOperation,
    DeleteOperation,
    ProductNotFound,
    InvalidParameter,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 7] = [
        ErrorCategory::SearchOperation,
        ErrorCategory::CreateOperation,
        ErrorCategory::RetrieveOperation,
        ErrorCategory::UpdateOperation,
        ErrorCategory::DeleteOperation,
        ErrorCategory::ProductNotFound,
        ErrorCategory::InvalidParameter,
    ];

    /// Stable wire code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorCategory::SearchOperation => "SEARCH_OPERATION_ERROR",
            ErrorCategory::CreateOperation => "CREATE_OPERATION_ERROR",
            ErrorCategory::RetrieveOperation => "RETRIEVE_OPERATION_ERROR",
            ErrorCategory::UpdateOperation => "UPDATE_OPERATION_ERROR",
            ErrorCategory::DeleteOperation => "DELETE_OPERATION_ERROR",
            ErrorCategory::ProductNotFound => "PRODUCT_NOT_FOUND_ERROR",
            ErrorCategory::InvalidParameter => "INVALID_PARAMETER_ERROR",
        }
    }

    /// True for the `*_OPERATION_ERROR` categories (backend failures).
    pub fn is_operational(self) -> bool {
        matches!(
            self,
            ErrorCategory::SearchOperation
                | ErrorCategory::CreateOperation
                | ErrorCategory::RetrieveOperation
                | ErrorCategory::UpdateOperation
                | ErrorCategory::DeleteOperation
        )
    }
}

impl core::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// A classified failure from the product detail service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{category}")]
pub struct OperationError {
    category: ErrorCategory,
    #[source]
    cause: Option<RepositoryError>,
}

impl OperationError {
    /// Validation failure: a required input was absent.
    pub fn invalid_parameter() -> Self {
        Self {
            category: ErrorCategory::InvalidParameter,
            cause: None,
        }
    }

    /// The existence probe found no record.
    pub fn not_found() -> Self {
        Self {
            category: ErrorCategory::ProductNotFound,
            cause: None,
        }
    }

    /// Backend failure, wrapping the repository error.
    pub fn operation(category: ErrorCategory, cause: RepositoryError) -> Self {
        Self {
            category,
            cause: Some(cause),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn cause(&self) -> Option<&RepositoryError> {
        self.cause.as_ref()
    }
}
