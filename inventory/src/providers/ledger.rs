//! Availability ledger storage contract.

use crate::error::Result;
use crate::model::{RoomAvailability, RoomId};
use chrono::NaiveDate;

/// Storage contract for the per-room, per-date availability ledger.
///
/// Exactly one row exists per `(room_id, date)` pair. Writes are
/// idempotent upserts keyed on that pair: writing a row with the same key
/// replaces prior content rather than duplicating it. Absence of a row is
/// meaningful (default availability) and is interpreted by the service
/// layer, never here.
///
/// # Implementation Notes
///
/// - No locking contract: concurrent writers on the same key are
///   last-write-wins. The ledger is an administrative inventory signal,
///   not a transactional booking ledger.
/// - Rows are never hard-deleted by this subsystem; they age out as
///   dates pass or are overwritten by later initialization runs.
pub trait AvailabilityLedger: Send + Sync {
    /// Point lookup by `(room_id, date)`.
    ///
    /// # Errors
    ///
    /// Returns error if the storage query fails.
    fn get(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Option<RoomAvailability>>> + Send;

    /// Range lookup for one room over the inclusive range `[start, end]`,
    /// ordered by date ascending.
    ///
    /// Only materialized rows are returned; dates without a row are
    /// absent from the result.
    ///
    /// # Errors
    ///
    /// Returns error if the storage query fails.
    fn get_range(
        &self,
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<RoomAvailability>>> + Send;

    /// All `(room_id, date)` pairs with `available_count = 0` across the
    /// given rooms for nights in the half-open range `[start, end)`.
    ///
    /// This is the single query behind the batched availability check:
    /// one round trip regardless of how many room ids are passed.
    ///
    /// # Errors
    ///
    /// Returns error if the storage query fails.
    fn sold_out_dates(
        &self,
        room_ids: &[RoomId],
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<(RoomId, NaiveDate)>>> + Send;

    /// Idempotent upsert of a single row, keyed on `(room_id, date)`.
    ///
    /// # Errors
    ///
    /// Returns error if the storage write fails.
    fn upsert(
        &self,
        row: &RoomAvailability,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Upsert a batch of rows.
    ///
    /// Not atomic: a mid-batch failure leaves earlier rows written.
    /// Re-running the same batch to completion repairs partial state.
    ///
    /// # Errors
    ///
    /// Returns error if any storage write fails.
    fn upsert_many(
        &self,
        rows: &[RoomAvailability],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
