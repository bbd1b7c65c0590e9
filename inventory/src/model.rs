//! Core domain types for the room inventory engine.
//!
//! All types are `Clone` and carry serde derives so they can cross the
//! HTTP boundary unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a room type within a hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub uuid::Uuid);

impl RoomId {
    /// Generate a new random `RoomId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotelId(pub uuid::Uuid);

impl HotelId {
    /// Generate a new random `HotelId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for HotelId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HotelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a platform user (hotel owner or admin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    /// Generate a new random `UserId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Catalog Types (read-only to this crate)
// ═══════════════════════════════════════════════════════════════════════

/// A room type in the catalog.
///
/// `quantity` is the number of physical units of this room type; the
/// ledger's `available_count` is always interpreted relative to it and
/// never exceeds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Room id.
    pub id: RoomId,
    /// Owning hotel.
    pub hotel_id: HotelId,
    /// Display name of the room type (e.g. "Deluxe Double").
    pub room_type: String,
    /// Total physical units of this room type.
    pub quantity: i32,
    /// Maximum guests a single unit sleeps.
    pub max_occupancy: i32,
    /// Static per-night base price, already resolved upstream.
    pub base_price: f64,
}

/// Moderation status of a hotel. Only approved hotels are searchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HotelStatus {
    /// Listed and searchable.
    Approved,
    /// Awaiting moderation.
    Pending,
    /// Rejected by moderation.
    Rejected,
    /// Temporarily delisted by the owner or an admin.
    Suspended,
}

impl HotelStatus {
    /// String form as stored in the directory.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Pending => "PENDING",
            Self::Rejected => "REJECTED",
            Self::Suspended => "SUSPENDED",
        }
    }

    /// Parse the stored string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "APPROVED" => Some(Self::Approved),
            "PENDING" => Some(Self::Pending),
            "REJECTED" => Some(Self::Rejected),
            "SUSPENDED" => Some(Self::Suspended),
            _ => None,
        }
    }
}

/// A hotel in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Hotel id.
    pub id: HotelId,
    /// Owning user; write access to inventory is restricted to them
    /// (or an admin).
    pub owner_id: UserId,
    /// Display name.
    pub name: String,
    /// City the hotel is located in (free text as entered at onboarding).
    pub city: String,
    /// Moderation status.
    pub status: HotelStatus,
    /// Category (e.g. "HOTEL", "HOSTEL", "RESORT").
    pub hotel_type: String,
}

// ═══════════════════════════════════════════════════════════════════════
// Ledger Types
// ═══════════════════════════════════════════════════════════════════════

/// One persisted availability ledger row.
///
/// Exactly one row exists per `(room_id, date)` pair; that pair is the
/// natural key. Absence of a row means default availability, i.e. the
/// room's full `quantity`.
///
/// `is_blocked == true` implies `available_count == 0`; the converse does
/// not hold (a sold-out date is not administratively blocked).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAvailability {
    /// Room this row belongs to.
    pub room_id: RoomId,
    /// Calendar date (one night).
    pub date: NaiveDate,
    /// Units still available for this night.
    pub available_count: i32,
    /// Administrative block flag.
    pub is_blocked: bool,
    /// Free-text reason, set only when blocked.
    pub block_reason: Option<String>,
}

/// One materialized calendar entry, gap-filled with default availability.
///
/// This is the read model for calendar UIs; unlike [`RoomAvailability`]
/// it always exists for every date in a requested range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDay {
    /// Calendar date.
    pub date: NaiveDate,
    /// Units available for this night.
    pub available_count: i32,
    /// The room's total quantity, for rendering "n of m".
    pub total_count: i32,
    /// Administrative block flag.
    pub is_blocked: bool,
    /// Block reason, if blocked.
    pub block_reason: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// Identity Types (collaborator output)
// ═══════════════════════════════════════════════════════════════════════

/// Role granted by the out-of-scope identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform administrator; may mutate any room's inventory.
    Admin,
    /// Hotel owner; may mutate inventory of rooms in hotels they own.
    HotelOwner,
    /// Regular guest; read-only.
    Guest,
}

impl Role {
    /// Parse the header/storage string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(Self::Admin),
            "HOTEL_OWNER" => Some(Self::HotelOwner),
            "GUEST" => Some(Self::Guest),
            _ => None,
        }
    }
}

/// The authenticated caller, as resolved by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Caller's user id.
    pub user_id: UserId,
    /// Roles granted to the caller.
    pub roles: Vec<Role>,
}

impl Actor {
    /// Create an actor with the given roles.
    #[must_use]
    pub const fn new(user_id: UserId, roles: Vec<Role>) -> Self {
        Self { user_id, roles }
    }

    /// Whether the caller holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}
