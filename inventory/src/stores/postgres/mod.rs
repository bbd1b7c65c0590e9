//! PostgreSQL implementations of the provider traits.
//!
//! All stores share one `PgPool` and use the runtime query API
//! (`sqlx::query_as` with `FromRow` row structs), so every crate in the
//! workspace builds without a live `DATABASE_URL`.

mod catalog;
mod directory;
mod ledger;

pub use catalog::PostgresRoomCatalog;
pub use directory::PostgresHotelDirectory;
pub use ledger::PostgresAvailabilityLedger;
