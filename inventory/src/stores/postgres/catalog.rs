//! PostgreSQL room catalog implementation.
//!
//! Read-only: the `rooms` table is owned and written by the onboarding
//! subsystem; this store only resolves room metadata for availability
//! checks.

use crate::error::{InventoryError, Result};
use crate::model::{HotelId, Room, RoomId};
use crate::providers::RoomCatalog;
use sqlx::PgPool;
use uuid::Uuid;

/// Room row as stored.
#[derive(Debug, sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    hotel_id: Uuid,
    room_type: String,
    quantity: i32,
    max_occupancy: i32,
    base_price: f64,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Self {
            id: RoomId(row.id),
            hotel_id: HotelId(row.hotel_id),
            room_type: row.room_type,
            quantity: row.quantity,
            max_occupancy: row.max_occupancy,
            base_price: row.base_price,
        }
    }
}

const ROOM_COLUMNS: &str = "id, hotel_id, room_type, quantity, max_occupancy, base_price";

/// `PostgreSQL` room catalog.
#[derive(Clone)]
pub struct PostgresRoomCatalog {
    /// `PostgreSQL` connection pool.
    pool: PgPool,
}

impl PostgresRoomCatalog {
    /// Create a new `PostgreSQL` room catalog.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RoomCatalog for PostgresRoomCatalog {
    async fn room_by_id(&self, room_id: RoomId) -> Result<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1"
        ))
        .bind(room_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to get room: {e}")))?;

        Ok(row.map(Room::from))
    }

    async fn rooms_by_ids(&self, room_ids: &[RoomId]) -> Result<Vec<Room>> {
        let ids: Vec<Uuid> = room_ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ANY($1)"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to get rooms by ids: {e}")))?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn rooms_for_hotel(&self, hotel_id: HotelId) -> Result<Vec<Room>> {
        let rows = sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE hotel_id = $1 ORDER BY id"
        ))
        .bind(hotel_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to get hotel rooms: {e}")))?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn rooms_for_hotels(&self, hotel_ids: &[HotelId]) -> Result<Vec<Room>> {
        let ids: Vec<Uuid> = hotel_ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE hotel_id = ANY($1) ORDER BY id"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to get hotels' rooms: {e}")))?;

        Ok(rows.into_iter().map(Room::from).collect())
    }
}
