//! Redis implementation of the link store.
//!
//! Each link is a hash at `link:{identifier}` with the fields `destination`,
//! `click_count` and `created_at` (Unix milliseconds). The key carries a
//! `PEXPIREAT` at `created_at + ttl`, so Redis itself enforces logical expiry
//! and reclaims memory. Multi-step operations run as Lua scripts, which Redis
//! executes atomically.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use std::sync::LazyLock;
use tracing::info;

use crate::domain::entities::{LinkRecord, link_ttl};
use crate::domain::repositories::{LinkStore, StoreError};

/// Creates the hash only when the key is absent. Returns 1 on insert, 0 on
/// conflict. Expired keys are already gone, so any existing key is live.
static INSERT_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
        if redis.call('EXISTS', KEYS[1]) == 1 then
            return 0
        end
        redis.call('HSET', KEYS[1], 'destination', ARGV[1], 'click_count', 0, 'created_at', ARGV[2])
        redis.call('PEXPIREAT', KEYS[1], ARGV[3])
        return 1
        "#,
    )
});

/// Increments the counter of an existing key and returns the updated fields,
/// or nil when the key is absent.
static FIND_AND_INCREMENT_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
        if redis.call('EXISTS', KEYS[1]) == 0 then
            return nil
        end
        redis.call('HINCRBY', KEYS[1], 'click_count', 1)
        return redis.call('HMGET', KEYS[1], 'destination', 'click_count', 'created_at')
        "#,
    )
});

/// Redis store for link records.
///
/// Uses `ConnectionManager` for automatic reconnection and connection reuse.
pub struct RedisLinkStore {
    conn: ConnectionManager,
    ttl: Duration,
    key_prefix: String,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        Self::connect_with_ttl(redis_url, link_ttl()).await
    }

    /// Connects with a custom retention window.
    pub async fn connect_with_ttl(redis_url: &str, ttl: Duration) -> Result<Self, StoreError> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Backend(format!("Failed to create Redis client: {}", e)))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self {
            conn,
            ttl,
            key_prefix: "link:".to_string(),
        };
        store.health_check().await?;

        info!("Connected to Redis");
        Ok(store)
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, identifier: &str) -> String {
        format!("{}{}", self.key_prefix, identifier)
    }
}

fn backend(e: redis::RedisError) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>, StoreError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| StoreError::Backend(format!("invalid created_at value: {millis}")))
}

/// Builds a record from the `HMGET destination click_count created_at` reply.
fn record_from_fields(
    identifier: &str,
    fields: (Option<String>, Option<i64>, Option<i64>),
) -> Result<Option<LinkRecord>, StoreError> {
    match fields {
        (Some(destination), Some(click_count), Some(created_at)) => Ok(Some(LinkRecord::new(
            identifier.to_string(),
            destination,
            click_count,
            timestamp_from_millis(created_at)?,
        ))),
        (None, None, None) => Ok(None),
        _ => Err(StoreError::Backend(format!(
            "link hash for `{identifier}` is missing fields"
        ))),
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn insert(
        &self,
        identifier: &str,
        destination: &str,
    ) -> Result<LinkRecord, StoreError> {
        let key = self.build_key(identifier);
        let created_at = Utc::now();
        let expires_at = created_at + self.ttl;
        let mut conn = self.conn.clone();

        let inserted: i64 = INSERT_SCRIPT
            .key(&key)
            .arg(destination)
            .arg(created_at.timestamp_millis())
            .arg(expires_at.timestamp_millis())
            .invoke_async(&mut conn)
            .await
            .map_err(backend)?;

        if inserted == 0 {
            return Err(StoreError::DuplicateIdentifier(identifier.to_string()));
        }

        // Millisecond precision matches what later reads return.
        Ok(LinkRecord::new(
            identifier.to_string(),
            destination.to_string(),
            0,
            timestamp_from_millis(created_at.timestamp_millis())?,
        ))
    }

    async fn find_and_increment(
        &self,
        identifier: &str,
    ) -> Result<Option<LinkRecord>, StoreError> {
        let key = self.build_key(identifier);
        let mut conn = self.conn.clone();

        let fields: Option<(Option<String>, Option<i64>, Option<i64>)> = FIND_AND_INCREMENT_SCRIPT
            .key(&key)
            .invoke_async(&mut conn)
            .await
            .map_err(backend)?;

        match fields {
            Some(fields) => record_from_fields(identifier, fields),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, identifier: &str) -> Result<Option<LinkRecord>, StoreError> {
        let key = self.build_key(identifier);
        let mut conn = self.conn.clone();

        let fields: (Option<String>, Option<i64>, Option<i64>) = redis::cmd("HMGET")
            .arg(&key)
            .arg("destination")
            .arg("click_count")
            .arg("created_at")
            .query_async(&mut conn)
            .await
            .map_err(backend)?;

        record_from_fields(identifier, fields)
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        // Redis evicts expired keys itself.
        Ok(0)
    }

    fn has_native_expiry(&self) -> bool {
        true
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.map_err(backend)
    }
}
