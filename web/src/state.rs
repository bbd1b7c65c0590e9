//! Shared application state.

use crate::config::ServerConfig;
use sqlx::PgPool;
use stayhub_inventory::providers::{CachedAccessPolicy, OwnerOrAdminPolicy};
use stayhub_inventory::stores::postgres::{
    PostgresAvailabilityLedger, PostgresHotelDirectory, PostgresRoomCatalog,
};
use stayhub_inventory::{AvailabilityService, InventoryConfig};
use stayhub_search::SearchService;

/// Production access policy: owner-or-admin with a TTL decision cache.
pub type PgAccessPolicy =
    CachedAccessPolicy<OwnerOrAdminPolicy<PostgresRoomCatalog, PostgresHotelDirectory>>;

/// Availability service wired to Postgres stores.
pub type PgAvailabilityService =
    AvailabilityService<PostgresAvailabilityLedger, PostgresRoomCatalog, PgAccessPolicy>;

/// Search service wired to Postgres stores.
pub type PgSearchService = SearchService<
    PostgresAvailabilityLedger,
    PostgresRoomCatalog,
    PgAccessPolicy,
    PostgresHotelDirectory,
>;

/// Application state shared across all handlers.
///
/// The services own cheaply-clonable store handles (each holds a
/// `PgPool`), so the whole state clones per request without pooling
/// anything twice.
#[derive(Clone)]
pub struct AppState {
    /// Availability ledger operations.
    pub availability: PgAvailabilityService,
    /// City search and hotel detail assembly.
    pub search: PgSearchService,
}

impl AppState {
    /// Wire both services onto one connection pool.
    #[must_use]
    pub fn new(pool: PgPool, config: &ServerConfig) -> Self {
        let ledger = PostgresAvailabilityLedger::new(pool.clone());
        let catalog = PostgresRoomCatalog::new(pool.clone());
        let directory = PostgresHotelDirectory::new(pool);

        let policy = CachedAccessPolicy::new(
            OwnerOrAdminPolicy::new(catalog.clone(), directory.clone()),
            config.authz_cache_ttl,
            config.authz_cache_capacity,
        );

        let availability = AvailabilityService::new(
            ledger,
            catalog.clone(),
            policy,
            InventoryConfig::default(),
        );
        let search = SearchService::new(availability.clone(), catalog, directory);

        Self {
            availability,
            search,
        }
    }
}
