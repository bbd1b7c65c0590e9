//! PostgreSQL hotel directory implementation.
//!
//! Read-only: the `hotels` table is owned by the onboarding and
//! moderation subsystems.

use crate::error::{InventoryError, Result};
use crate::model::{Hotel, HotelId, HotelStatus, UserId};
use crate::providers::HotelDirectory;
use sqlx::PgPool;
use uuid::Uuid;

/// Hotel row as stored.
#[derive(Debug, sqlx::FromRow)]
struct HotelRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    city: String,
    status: String,
    hotel_type: String,
}

impl TryFrom<HotelRow> for Hotel {
    type Error = InventoryError;

    fn try_from(row: HotelRow) -> Result<Self> {
        let status = HotelStatus::parse(&row.status).ok_or_else(|| {
            InventoryError::Database(format!("Unknown hotel status: {}", row.status))
        })?;

        Ok(Self {
            id: HotelId(row.id),
            owner_id: UserId(row.owner_id),
            name: row.name,
            city: row.city,
            status,
            hotel_type: row.hotel_type,
        })
    }
}

const HOTEL_COLUMNS: &str = "id, owner_id, name, city, status, hotel_type";

/// `PostgreSQL` hotel directory.
#[derive(Clone)]
pub struct PostgresHotelDirectory {
    /// `PostgreSQL` connection pool.
    pool: PgPool,
}

impl PostgresHotelDirectory {
    /// Create a new `PostgreSQL` hotel directory.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl HotelDirectory for PostgresHotelDirectory {
    async fn hotel_by_id(&self, hotel_id: HotelId) -> Result<Option<Hotel>> {
        let row = sqlx::query_as::<_, HotelRow>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = $1"
        ))
        .bind(hotel_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to get hotel: {e}")))?;

        row.map(Hotel::try_from).transpose()
    }

    async fn search_approved(
        &self,
        city: &str,
        hotel_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Hotel>> {
        let rows = sqlx::query_as::<_, HotelRow>(&format!(
            r"
            SELECT {HOTEL_COLUMNS}
            FROM hotels
            WHERE status = 'APPROVED'
              AND LOWER(city) = LOWER($1)
              AND ($2::text IS NULL OR hotel_type = $2)
            ORDER BY name
            LIMIT $3 OFFSET $4
            "
        ))
        .bind(city)
        .bind(hotel_type)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InventoryError::Database(format!("Failed to search hotels: {e}")))?;

        rows.into_iter().map(Hotel::try_from).collect()
    }
}
