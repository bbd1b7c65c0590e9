//! Hotel directory trait.
//!
//! The directory is owned by the onboarding/moderation subsystem; this
//! crate reads hotel listings from it. Only approved hotels are ever
//! returned by the search path.

use crate::error::Result;
use crate::model::{Hotel, HotelId};

/// Read-only access to the hotel directory.
pub trait HotelDirectory: Send + Sync {
    /// Look up a single hotel regardless of status.
    ///
    /// # Errors
    ///
    /// Returns error if the storage query fails.
    fn hotel_by_id(
        &self,
        hotel_id: HotelId,
    ) -> impl std::future::Future<Output = Result<Option<Hotel>>> + Send;

    /// Page of approved hotels in a city, optionally filtered by type.
    ///
    /// City matching is case-insensitive equality against the normalized
    /// city string; callers normalize before querying. Results are
    /// ordered by name so pagination is stable.
    ///
    /// # Errors
    ///
    /// Returns error if the storage query fails.
    fn search_approved(
        &self,
        city: &str,
        hotel_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Hotel>>> + Send;
}
