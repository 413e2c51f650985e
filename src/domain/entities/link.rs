//! Link record entity representing a shortened URL mapping.

use chrono::{DateTime, Duration, Utc};

/// Number of days a link stays resolvable after creation.
pub const LINK_TTL_DAYS: i64 = 30;

/// Retention window applied to every link record.
pub fn link_ttl() -> Duration {
    Duration::days(LINK_TTL_DAYS)
}

/// A shortened URL with its click counter.
///
/// `identifier`, `destination` and `created_at` never change after creation.
/// `click_count` only grows, and only through a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub identifier: String,
    pub destination: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Creates a new LinkRecord instance.
    pub fn new(
        identifier: String,
        destination: String,
        click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            identifier,
            destination,
            click_count,
            created_at,
        }
    }

    /// Instant at which the record stops being resolvable.
    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        self.created_at + ttl
    }

    /// Returns true once `now` has reached the end of the retention window.
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now >= self.expires_at(ttl)
    }

    /// Returns true if the record has passed its expiry time.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(Utc::now(), ttl)
    }
}
