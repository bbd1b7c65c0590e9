//! Storage implementations for the provider traits.

pub mod postgres;

pub use postgres::{PostgresAvailabilityLedger, PostgresHotelDirectory, PostgresRoomCatalog};
