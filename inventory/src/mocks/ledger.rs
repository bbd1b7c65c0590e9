//! Mock availability ledger for testing.

use crate::error::{InventoryError, Result};
use crate::model::{RoomAvailability, RoomId};
use crate::providers::AvailabilityLedger;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock availability ledger.
///
/// Stores rows in a `HashMap` keyed on `(room_id, date)`, which makes
/// the natural-key upsert semantics trivially exact.
#[derive(Debug, Clone)]
pub struct MockAvailabilityLedger {
    rows: Arc<Mutex<HashMap<(RoomId, NaiveDate), RoomAvailability>>>,
}

impl MockAvailabilityLedger {
    /// Create an empty mock ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of materialized rows, for asserting lazy-row behavior.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the lock is poisoned.
    pub fn row_count(&self) -> Result<usize> {
        let rows = self.rows.lock().map_err(|_| InventoryError::Internal)?;
        Ok(rows.len())
    }
}

impl Default for MockAvailabilityLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl AvailabilityLedger for MockAvailabilityLedger {
    fn get(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<RoomAvailability>>> + Send {
        let rows = Arc::clone(&self.rows);

        async move {
            let rows = rows.lock().map_err(|_| InventoryError::Internal)?;
            Ok(rows.get(&(room_id, date)).cloned())
        }
    }

    fn get_range(
        &self,
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<RoomAvailability>>> + Send {
        let rows = Arc::clone(&self.rows);

        async move {
            let rows = rows.lock().map_err(|_| InventoryError::Internal)?;
            let mut matched: Vec<RoomAvailability> = rows
                .values()
                .filter(|row| row.room_id == room_id && row.date >= start && row.date <= end)
                .cloned()
                .collect();
            matched.sort_by_key(|row| row.date);
            Ok(matched)
        }
    }

    fn sold_out_dates(
        &self,
        room_ids: &[RoomId],
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<(RoomId, NaiveDate)>>> + Send {
        let rows = Arc::clone(&self.rows);
        let room_ids = room_ids.to_vec();

        async move {
            let rows = rows.lock().map_err(|_| InventoryError::Internal)?;
            let mut matched: Vec<(RoomId, NaiveDate)> = rows
                .values()
                .filter(|row| {
                    row.available_count == 0
                        && row.date >= start
                        && row.date < end
                        && room_ids.contains(&row.room_id)
                })
                .map(|row| (row.room_id, row.date))
                .collect();
            matched.sort_by_key(|(room_id, date)| (room_id.0, *date));
            Ok(matched)
        }
    }

    fn upsert(&self, row: &RoomAvailability) -> impl Future<Output = Result<()>> + Send {
        let rows = Arc::clone(&self.rows);
        let row = row.clone();

        async move {
            let mut rows = rows.lock().map_err(|_| InventoryError::Internal)?;
            rows.insert((row.room_id, row.date), row);
            Ok(())
        }
    }

    fn upsert_many(&self, batch: &[RoomAvailability]) -> impl Future<Output = Result<()>> + Send {
        let rows = Arc::clone(&self.rows);
        let batch = batch.to_vec();

        async move {
            let mut rows = rows.lock().map_err(|_| InventoryError::Internal)?;
            for row in batch {
                rows.insert((row.room_id, row.date), row);
            }
            Ok(())
        }
    }
}
