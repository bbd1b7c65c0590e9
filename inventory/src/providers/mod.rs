//! Provider traits for storage and external collaborators.
//!
//! The availability engine owns exactly one store (the ledger) and reads
//! from two external catalogs (rooms, hotels). Identity and permissions
//! live outside this crate entirely; they enter through [`AccessPolicy`].
//!
//! All traits use return-position `impl Future` so services stay generic
//! and mock implementations run at memory speed in tests.

mod access;
mod catalog;
mod directory;
mod ledger;

pub use access::{AccessPolicy, CachedAccessPolicy, OwnerOrAdminPolicy};
pub use catalog::RoomCatalog;
pub use directory::HotelDirectory;
pub use ledger::AvailabilityLedger;
