//! # Stayhub Inventory
//!
//! Per-day room availability ledger and its service layer.
//!
//! ## Architecture
//!
//! ```text
//! AvailabilityService ──▶ AvailabilityLedger (owned store)
//!        │                RoomCatalog        (read-only collaborator)
//!        │                AccessPolicy       (identity collaborator)
//!        ▼
//!   RoomAvailability rows, one per (room, date)
//! ```
//!
//! The ledger is lazy: dates with no row carry default availability
//! (the room's full quantity). Writes are idempotent upserts on the
//! `(room, date)` natural key with last-write-wins semantics.
//!
//! The defining operation is the batched availability check: N rooms,
//! at most two storage queries, the same per-room answer as the
//! single-room path.
//!
//! ## Example
//!
//! ```rust,ignore
//! use stayhub_inventory::{AvailabilityService, InventoryConfig};
//! use stayhub_inventory::mocks::{MockAccessPolicy, MockAvailabilityLedger, MockRoomCatalog};
//!
//! let service = AvailabilityService::new(
//!     MockAvailabilityLedger::new(),
//!     MockRoomCatalog::new(),
//!     MockAccessPolicy::new(),
//!     InventoryConfig::default(),
//! );
//! let ok = service.is_room_available(room_id, check_in, check_out, 2).await?;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod availability;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod stores;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use availability::{
    AvailabilityService, HotelAvailability, HotelRooms, RoomAvailabilitySnapshot,
};
pub use config::InventoryConfig;
pub use error::{InventoryError, Result};
pub use model::{
    Actor, AvailabilityDay, Hotel, HotelId, HotelStatus, Role, Room, RoomAvailability, RoomId,
    UserId,
};
