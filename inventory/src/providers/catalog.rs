//! Room catalog trait.
//!
//! The catalog is owned by the onboarding subsystem; this crate only
//! reads room metadata (quantity, occupancy, base price) from it.

use crate::error::Result;
use crate::model::{HotelId, Room, RoomId};

/// Read-only access to the room catalog.
pub trait RoomCatalog: Send + Sync {
    /// Look up a single room.
    ///
    /// Returns `None` for unknown ids; callers decide whether that is an
    /// error (write paths) or "not available" (read paths).
    ///
    /// # Errors
    ///
    /// Returns error if the storage query fails.
    fn room_by_id(
        &self,
        room_id: RoomId,
    ) -> impl std::future::Future<Output = Result<Option<Room>>> + Send;

    /// Fetch metadata for many rooms in a single query.
    ///
    /// Unknown ids are silently absent from the result.
    ///
    /// # Errors
    ///
    /// Returns error if the storage query fails.
    fn rooms_by_ids(
        &self,
        room_ids: &[RoomId],
    ) -> impl std::future::Future<Output = Result<Vec<Room>>> + Send;

    /// All rooms belonging to one hotel.
    ///
    /// # Errors
    ///
    /// Returns error if the storage query fails.
    fn rooms_for_hotel(
        &self,
        hotel_id: HotelId,
    ) -> impl std::future::Future<Output = Result<Vec<Room>>> + Send;

    /// All rooms belonging to any of the given hotels, in a single query.
    ///
    /// # Errors
    ///
    /// Returns error if the storage query fails.
    fn rooms_for_hotels(
        &self,
        hotel_ids: &[HotelId],
    ) -> impl std::future::Future<Output = Result<Vec<Room>>> + Send;
}
