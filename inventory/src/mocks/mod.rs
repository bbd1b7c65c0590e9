//! In-memory mock providers for testing.
//!
//! Every provider trait has a mock backed by `Arc<Mutex<HashMap>>` so
//! service logic can be exercised at memory speed, without Postgres.

mod access;
mod catalog;
mod directory;
mod ledger;

pub use access::MockAccessPolicy;
pub use catalog::MockRoomCatalog;
pub use directory::MockHotelDirectory;
pub use ledger::MockAvailabilityLedger;
