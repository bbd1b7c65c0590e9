//! PostgreSQL availability ledger implementation.
//!
//! The ledger is one table, `room_availability`, with the natural key
//! `(room_id, date)` as its primary key. Upserts lean on
//! `ON CONFLICT … DO UPDATE`, which makes the idempotence contract a
//! property of the schema rather than of caller discipline.

use crate::error::{InventoryError, Result};
use crate::model::{RoomAvailability, RoomId};
use crate::providers::AvailabilityLedger;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

/// Ledger row as stored.
#[derive(Debug, sqlx::FromRow)]
struct AvailabilityRow {
    room_id: Uuid,
    date: NaiveDate,
    available_count: i32,
    is_blocked: bool,
    block_reason: Option<String>,
}

impl From<AvailabilityRow> for RoomAvailability {
    fn from(row: AvailabilityRow) -> Self {
        Self {
            room_id: RoomId(row.room_id),
            date: row.date,
            available_count: row.available_count,
            is_blocked: row.is_blocked,
            block_reason: row.block_reason,
        }
    }
}

/// Sold-out `(room, night)` pair row.
#[derive(Debug, sqlx::FromRow)]
struct SoldOutRow {
    room_id: Uuid,
    date: NaiveDate,
}

/// `PostgreSQL` availability ledger.
#[derive(Clone)]
pub struct PostgresAvailabilityLedger {
    /// `PostgreSQL` connection pool.
    pool: PgPool,
}

impl PostgresAvailabilityLedger {
    /// Create a new `PostgreSQL` ledger store.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    ///
    /// # Errors
    ///
    /// Returns error if migrations fail.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| InventoryError::Database(format!("Migration failed: {e}")))?;
        Ok(())
    }
}

impl AvailabilityLedger for PostgresAvailabilityLedger {
    async fn get(&self, room_id: RoomId, date: NaiveDate) -> Result<Option<RoomAvailability>> {
        let row = sqlx::query_as::<_, AvailabilityRow>(
            r"
            SELECT room_id, date, available_count, is_blocked, block_reason
            FROM room_availability
            WHERE room_id = $1 AND date = $2
            ",
        )
        .bind(room_id.0)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to get ledger row: {e}")))?;

        Ok(row.map(RoomAvailability::from))
    }

    async fn get_range(
        &self,
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RoomAvailability>> {
        let rows = sqlx::query_as::<_, AvailabilityRow>(
            r"
            SELECT room_id, date, available_count, is_blocked, block_reason
            FROM room_availability
            WHERE room_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date ASC
            ",
        )
        .bind(room_id.0)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to get ledger range: {e}")))?;

        Ok(rows.into_iter().map(RoomAvailability::from).collect())
    }

    async fn sold_out_dates(
        &self,
        room_ids: &[RoomId],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(RoomId, NaiveDate)>> {
        let ids: Vec<Uuid> = room_ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query_as::<_, SoldOutRow>(
            r"
            SELECT room_id, date
            FROM room_availability
            WHERE room_id = ANY($1) AND date >= $2 AND date < $3 AND available_count = 0
            ORDER BY room_id, date
            ",
        )
        .bind(&ids)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to get sold-out dates: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| (RoomId(row.room_id), row.date))
            .collect())
    }

    async fn upsert(&self, row: &RoomAvailability) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO room_availability (room_id, date, available_count, is_blocked, block_reason)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (room_id, date) DO UPDATE SET
                available_count = EXCLUDED.available_count,
                is_blocked = EXCLUDED.is_blocked,
                block_reason = EXCLUDED.block_reason
            ",
        )
        .bind(row.room_id.0)
        .bind(row.date)
        .bind(row.available_count)
        .bind(row.is_blocked)
        .bind(&row.block_reason)
        .execute(&self.pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to upsert ledger row: {e}")))?;

        Ok(())
    }

    async fn upsert_many(&self, rows: &[RoomAvailability]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        // One UNNEST round trip rather than a statement per row; a 365-day
        // initialization is still a single write.
        let room_ids: Vec<Uuid> = rows.iter().map(|r| r.room_id.0).collect();
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        let counts: Vec<i32> = rows.iter().map(|r| r.available_count).collect();
        let blocked: Vec<bool> = rows.iter().map(|r| r.is_blocked).collect();
        let reasons: Vec<Option<String>> = rows.iter().map(|r| r.block_reason.clone()).collect();

        sqlx::query(
            r"
            INSERT INTO room_availability (room_id, date, available_count, is_blocked, block_reason)
            SELECT * FROM UNNEST($1::uuid[], $2::date[], $3::int[], $4::bool[], $5::text[])
            ON CONFLICT (room_id, date) DO UPDATE SET
                available_count = EXCLUDED.available_count,
                is_blocked = EXCLUDED.is_blocked,
                block_reason = EXCLUDED.block_reason
            ",
        )
        .bind(&room_ids)
        .bind(&dates)
        .bind(&counts)
        .bind(&blocked)
        .bind(&reasons)
        .execute(&self.pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to upsert ledger rows: {e}")))?;

        Ok(())
    }
}
