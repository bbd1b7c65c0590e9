//! Error types for inventory and availability operations.

use thiserror::Error;

/// Result type alias for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Error taxonomy for the availability ledger and its services.
///
/// Every variant is local, synchronous and non-retryable except
/// [`InventoryError::Database`], which carries whatever the storage
/// layer reported and propagates unchanged to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    // ═══════════════════════════════════════════════════════════
    // Lookup Errors
    // ═══════════════════════════════════════════════════════════

    /// Room id is unknown to the catalog.
    #[error("Room {room_id} not found")]
    RoomNotFound {
        /// The room id that failed to resolve.
        room_id: uuid::Uuid,
    },

    /// Hotel id is unknown to the directory, or the hotel is not approved.
    #[error("Hotel {hotel_id} not found")]
    HotelNotFound {
        /// The hotel id that failed to resolve.
        hotel_id: uuid::Uuid,
    },

    // ═══════════════════════════════════════════════════════════
    // Caller Errors
    // ═══════════════════════════════════════════════════════════

    /// Date range or count argument is out of bounds.
    #[error("Invalid range: {reason}")]
    InvalidRange {
        /// Human-readable description of the violation.
        reason: String,
    },

    /// Caller is neither the owning hotel's owner nor an admin.
    #[error("Forbidden: {required}")]
    Forbidden {
        /// The permission the caller was missing.
        required: String,
    },

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Storage operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error (should not be exposed to users).
    #[error("Internal error")]
    Internal,
}

impl InventoryError {
    /// Returns `true` if this error is due to invalid caller input
    /// rather than a system failure.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stayhub_inventory::InventoryError;
    /// let err = InventoryError::InvalidRange { reason: "start >= end".into() };
    /// assert!(err.is_user_error());
    /// assert!(!InventoryError::Internal.is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::RoomNotFound { .. }
                | Self::HotelNotFound { .. }
                | Self::InvalidRange { .. }
                | Self::Forbidden { .. }
        )
    }

    /// Convenience constructor for [`InventoryError::InvalidRange`].
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            reason: reason.into(),
        }
    }
}
