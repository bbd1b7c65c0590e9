//! Error types for search operations.

use stayhub_inventory::InventoryError;
use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised by criteria validation and search assembly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Search criteria are missing, malformed or out of bounds.
    #[error("Validation failed: {reason}")]
    Validation {
        /// Human-readable description of the violation.
        reason: String,
    },

    /// An underlying inventory or catalog operation failed.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl SearchError {
    /// Returns `true` if this error is due to invalid caller input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Validation { .. } => true,
            Self::Inventory(inner) => inner.is_user_error(),
        }
    }

    /// Convenience constructor for [`SearchError::Validation`].
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}
