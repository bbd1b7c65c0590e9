//! Server configuration from environment variables.

use std::time::Duration;

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (`PORT`, default 3000).
    pub port: u16,
    /// Postgres connection string (`DATABASE_URL`).
    pub database_url: String,
    /// TTL for cached authorization decisions
    /// (`AUTHZ_CACHE_TTL_SECS`, default 60).
    pub authz_cache_ttl: Duration,
    /// Maximum cached authorization decisions
    /// (`AUTHZ_CACHE_CAPACITY`, default 10,000).
    pub authz_cache_capacity: usize,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns error when `DATABASE_URL` is unset or a numeric variable
    /// fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse()?,
            Err(_) => 3000,
        };
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let authz_cache_ttl = match std::env::var("AUTHZ_CACHE_TTL_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse()?),
            Err(_) => Duration::from_secs(60),
        };
        let authz_cache_capacity = match std::env::var("AUTHZ_CACHE_CAPACITY") {
            Ok(raw) => raw.parse()?,
            Err(_) => 10_000,
        };

        Ok(Self {
            port,
            database_url,
            authz_cache_ttl,
            authz_cache_capacity,
        })
    }
}
