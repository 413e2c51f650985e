//! Link store implementations.
//!
//! # Stores
//!
//! - [`PgLinkStore`] - PostgreSQL table with a periodic expiry sweep
//! - [`RedisLinkStore`] - Redis hashes with native key expiry
//! - [`MemoryLinkStore`] - in-process map for development and tests
//!
//! [`connect`] builds whichever one the configuration selects.

pub mod memory_link_store;
pub mod pg_link_store;
pub mod redis_link_store;

pub use memory_link_store::MemoryLinkStore;
pub use pg_link_store::PgLinkStore;
pub use redis_link_store::RedisLinkStore;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::LinkStore;

/// Connection attempts made before startup gives up on PostgreSQL.
const PG_CONNECT_ATTEMPTS: usize = 5;

/// Builds the configured link store.
///
/// For PostgreSQL this also applies pending migrations.
///
/// # Errors
///
/// Returns an error if the backend is unreachable, its URL is missing, or
/// migrations fail.
pub async fn connect(config: &Config) -> Result<Arc<dyn LinkStore>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;

            let pool = connect_pg(config, database_url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to apply migrations")?;

            Ok(Arc::new(PgLinkStore::new(Arc::new(pool))))
        }
        StorageBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis backend")?;

            let store = RedisLinkStore::connect(redis_url)
                .await
                .context("Failed to connect to Redis")?;

            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory link store");
            Ok(Arc::new(MemoryLinkStore::new()))
        }
    }
}

/// Opens a pool, retrying with jittered exponential backoff while the
/// database comes up.
async fn connect_pg(config: &Config, database_url: &str) -> Result<PgPool> {
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(PG_CONNECT_ATTEMPTS - 1);

    let pool = Retry::spawn(strategy, || async move {
        PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect(database_url)
            .await
            .inspect_err(|e| tracing::warn!("Database connection attempt failed: {}", e))
    })
    .await
    .context("Failed to connect to database")?;

    Ok(pool)
}
