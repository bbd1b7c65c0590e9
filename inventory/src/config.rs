//! Inventory configuration.
//!
//! Values here are provided by the application, not hardcoded in the
//! services that consume them.

/// Availability ledger configuration.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Look-ahead horizon for ledger initialization, in days.
    ///
    /// When a room is provisioned, one ledger row is written per day
    /// from today through `today + horizon_days`.
    ///
    /// Default: 365 days
    pub horizon_days: i64,
}

impl InventoryConfig {
    /// Create a configuration with the default horizon.
    #[must_use]
    pub const fn new() -> Self {
        Self { horizon_days: 365 }
    }

    /// Set the initialization horizon.
    #[must_use]
    pub const fn with_horizon_days(mut self, days: i64) -> Self {
        self.horizon_days = days;
        self
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::new()
    }
}
