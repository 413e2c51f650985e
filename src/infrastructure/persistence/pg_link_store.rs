//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{LinkRecord, link_ttl};
use crate::domain::repositories::{LinkStore, StoreError};

/// Constraint backing identifier uniqueness (see `migrations/`).
const IDENTIFIER_CONSTRAINT: &str = "links_pkey";

/// Row shape shared by every query below.
#[derive(sqlx::FromRow)]
struct LinkRow {
    identifier: String,
    destination: String,
    click_count: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for LinkRecord {
    fn from(row: LinkRow) -> Self {
        LinkRecord::new(
            row.identifier,
            row.destination,
            row.click_count,
            row.created_at,
        )
    }
}

/// PostgreSQL store for link records.
///
/// Expiry is evaluated in SQL against `created_at`, so lookups never return
/// an expired row even before the expiry worker deletes it.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
    ttl: Duration,
}

impl PgLinkStore {
    /// Creates a new store with the default 30-day retention.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_ttl(pool, link_ttl())
    }

    /// Creates a new store with a custom retention window.
    pub fn with_ttl(pool: Arc<PgPool>, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// TTL as fractional seconds, the unit `make_interval(secs => …)` takes.
    fn ttl_secs(&self) -> f64 {
        self.ttl.num_milliseconds() as f64 / 1000.0
    }
}

fn map_sqlx_error(e: sqlx::Error, identifier: &str) -> StoreError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
        && db.constraint() == Some(IDENTIFIER_CONSTRAINT)
    {
        return StoreError::DuplicateIdentifier(identifier.to_string());
    }

    StoreError::Backend(e.to_string())
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn insert(
        &self,
        identifier: &str,
        destination: &str,
    ) -> Result<LinkRecord, StoreError> {
        // A conflicting row is only replaced when it is already expired; a
        // live conflict leaves the row untouched and returns nothing.
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (identifier, destination)
            VALUES ($1, $2)
            ON CONFLICT (identifier) DO UPDATE
                SET destination = EXCLUDED.destination,
                    click_count = 0,
                    created_at = NOW()
                WHERE links.created_at <= NOW() - make_interval(secs => $3)
            RETURNING identifier, destination, click_count, created_at
            "#,
        )
        .bind(identifier)
        .bind(destination)
        .bind(self.ttl_secs())
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, identifier))?;

        row.map(LinkRecord::from)
            .ok_or_else(|| StoreError::DuplicateIdentifier(identifier.to_string()))
    }

    async fn find_and_increment(
        &self,
        identifier: &str,
    ) -> Result<Option<LinkRecord>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET click_count = click_count + 1
            WHERE identifier = $1
              AND created_at > NOW() - make_interval(secs => $2)
            RETURNING identifier, destination, click_count, created_at
            "#,
        )
        .bind(identifier)
        .bind(self.ttl_secs())
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, identifier))?;

        Ok(row.map(LinkRecord::from))
    }

    async fn find_by_id(&self, identifier: &str) -> Result<Option<LinkRecord>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT identifier, destination, click_count, created_at
            FROM links
            WHERE identifier = $1
              AND created_at > NOW() - make_interval(secs => $2)
            "#,
        )
        .bind(identifier)
        .bind(self.ttl_secs())
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, identifier))?;

        Ok(row.map(LinkRecord::from))
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        let result =
            sqlx::query("DELETE FROM links WHERE created_at <= NOW() - make_interval(secs => $1)")
                .bind(self.ttl_secs())
                .execute(self.pool.as_ref())
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
