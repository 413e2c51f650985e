//! Storage contract for link records.

use std::time::Duration;

use crate::domain::entities::LinkRecord;
use async_trait::async_trait;

/// Failures reported by a [`LinkStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A live record already uses this identifier.
    #[error("identifier `{0}` is already in use")]
    DuplicateIdentifier(String),

    /// The operation did not finish within the configured bound.
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// The backend rejected the operation or could not be reached.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Persistent mapping from identifiers to link records.
///
/// Records older than the store's TTL are logically expired: every lookup
/// treats them as absent, even while they still occupy storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::RedisLinkStore`] - Redis with native key expiry
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - in-process, for development and tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Persists a new record with `click_count = 0` and `created_at = now`.
    ///
    /// Conflicts are detected by the backend in the same write, never by a
    /// prior lookup.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateIdentifier`] if a live record already
    /// uses `identifier`.
    async fn insert(&self, identifier: &str, destination: &str)
    -> Result<LinkRecord, StoreError>;

    /// Increments the click counter of a live record and returns the
    /// post-increment record, as one indivisible operation.
    ///
    /// Returns `Ok(None)` if the identifier is absent or expired.
    async fn find_and_increment(&self, identifier: &str)
    -> Result<Option<LinkRecord>, StoreError>;

    /// Reads a live record without touching its counter.
    ///
    /// Returns `Ok(None)` if the identifier is absent or expired.
    async fn find_by_id(&self, identifier: &str) -> Result<Option<LinkRecord>, StoreError>;

    /// Physically removes logically expired records and returns how many
    /// were removed. Never touches a live record.
    async fn purge_expired(&self) -> Result<u64, StoreError>;

    /// Returns true when the backend reclaims expired records on its own,
    /// so no expiry worker is needed.
    fn has_native_expiry(&self) -> bool {
        false
    }

    /// Checks that the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}
