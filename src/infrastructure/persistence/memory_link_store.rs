//! In-process implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{LinkRecord, link_ttl};
use crate::domain::repositories::{LinkStore, StoreError};

/// In-memory link store backed by `DashMap`.
///
/// Insert and increment run while holding the shard lock for the key, which
/// makes both atomic with respect to concurrent callers. Contents are lost on
/// restart; use it for development and tests.
#[derive(Debug)]
pub struct MemoryLinkStore {
    links: DashMap<String, LinkRecord>,
    ttl: Duration,
}

impl MemoryLinkStore {
    /// Creates an empty store with the default 30-day retention.
    pub fn new() -> Self {
        Self::with_ttl(link_ttl())
    }

    /// Creates an empty store with a custom retention window.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            links: DashMap::new(),
            ttl,
        }
    }

    /// Inserts a record with an explicit creation time.
    ///
    /// Same conflict rules as [`LinkStore::insert`]. Used to seed the store
    /// with records of a known age.
    pub fn insert_at(
        &self,
        identifier: &str,
        destination: &str,
        created_at: DateTime<Utc>,
    ) -> Result<LinkRecord, StoreError> {
        let record = LinkRecord::new(
            identifier.to_string(),
            destination.to_string(),
            0,
            created_at,
        );

        match self.links.entry(identifier.to_string()) {
            Entry::Occupied(mut existing) => {
                if !existing.get().is_expired(self.ttl) {
                    return Err(StoreError::DuplicateIdentifier(identifier.to_string()));
                }
                existing.insert(record.clone());
            }
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
            }
        }

        Ok(record)
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Default for MemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn insert(
        &self,
        identifier: &str,
        destination: &str,
    ) -> Result<LinkRecord, StoreError> {
        self.insert_at(identifier, destination, Utc::now())
    }

    async fn find_and_increment(
        &self,
        identifier: &str,
    ) -> Result<Option<LinkRecord>, StoreError> {
        let Some(mut record) = self.links.get_mut(identifier) else {
            return Ok(None);
        };

        if record.is_expired(self.ttl) {
            return Ok(None);
        }

        record.click_count += 1;
        Ok(Some(record.value().clone()))
    }

    async fn find_by_id(&self, identifier: &str) -> Result<Option<LinkRecord>, StoreError> {
        Ok(self
            .links
            .get(identifier)
            .filter(|record| !record.is_expired(self.ttl))
            .map(|record| record.value().clone()))
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        let now = Utc::now();
        let mut removed = 0u64;

        self.links.retain(|_, record| {
            let keep = !record.is_expired_at(now, self.ttl);
            if !keep {
                removed += 1;
            }
            keep
        });

        Ok(removed)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days_ago(days: i64) -> DateTime<Utc> {
        Utc::now() - Duration::days(days)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryLinkStore::new();

        let created = store.insert("abc12345", "https://example.com").await.unwrap();
        assert_eq!(created.click_count, 0);

        let found = store.find_by_id("abc12345").await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_insert_conflict() {
        let store = MemoryLinkStore::new();
        store.insert("abc12345", "https://example.com").await.unwrap();

        let err = store
            .insert("abc12345", "https://other.com")
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateIdentifier(ref id) if id == "abc12345"));
        let kept = store.find_by_id("abc12345").await.unwrap().unwrap();
        assert_eq!(kept.destination, "https://example.com");
    }

    #[tokio::test]
    async fn test_insert_over_expired_record() {
        let store = MemoryLinkStore::new();
        store
            .insert_at("abc12345", "https://old.com", days_ago(31))
            .unwrap();

        let created = store.insert("abc12345", "https://new.com").await.unwrap();

        assert_eq!(created.destination, "https://new.com");
        assert_eq!(created.click_count, 0);
    }

    #[tokio::test]
    async fn test_find_and_increment_counts() {
        let store = MemoryLinkStore::new();
        store.insert("abc12345", "https://example.com").await.unwrap();

        let first = store.find_and_increment("abc12345").await.unwrap().unwrap();
        let second = store.find_and_increment("abc12345").await.unwrap().unwrap();

        assert_eq!(first.click_count, 1);
        assert_eq!(second.click_count, 2);
    }

    #[tokio::test]
    async fn test_find_by_id_does_not_increment() {
        let store = MemoryLinkStore::new();
        store.insert("abc12345", "https://example.com").await.unwrap();

        store.find_by_id("abc12345").await.unwrap();
        store.find_by_id("abc12345").await.unwrap();

        let record = store.find_by_id("abc12345").await.unwrap().unwrap();
        assert_eq!(record.click_count, 0);
    }

    #[tokio::test]
    async fn test_missing_identifier() {
        let store = MemoryLinkStore::new();

        assert!(store.find_by_id("nope").await.unwrap().is_none());
        assert!(store.find_and_increment("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_record_is_unreachable_before_purge() {
        let store = MemoryLinkStore::new();
        store
            .insert_at("old12345", "https://example.com", days_ago(31))
            .unwrap();

        assert!(store.find_by_id("old12345").await.unwrap().is_none());
        assert!(store.find_and_increment("old12345").await.unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_record_is_reachable_just_inside_window() {
        let store = MemoryLinkStore::new();
        store
            .insert_at("young123", "https://example.com", days_ago(29))
            .unwrap();

        assert!(store.find_by_id("young123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_purge_removes_only_expired() {
        let store = MemoryLinkStore::new();
        store
            .insert_at("old12345", "https://old.com", days_ago(31))
            .unwrap();
        store
            .insert_at("young123", "https://young.com", days_ago(1))
            .unwrap();

        let removed = store.purge_expired().await.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.find_by_id("young123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_custom_ttl() {
        let store = MemoryLinkStore::with_ttl(Duration::hours(1));
        store
            .insert_at("abc12345", "https://example.com", Utc::now() - Duration::hours(2))
            .unwrap();

        assert!(store.find_by_id("abc12345").await.unwrap().is_none());
    }
}
