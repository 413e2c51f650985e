//! Short link resolution with click counting.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tracing::{debug, error};

use super::{DEFAULT_STORE_TIMEOUT, bounded};
use crate::domain::repositories::LinkStore;
use crate::utils::code_generator::is_well_formed_identifier;
use crate::utils::url_normalizer::normalize_destination;

/// Why a resolution fell back to the default destination.
///
/// Visitors see the same redirect either way; the distinction exists for
/// logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The identifier is absent, expired or malformed.
    NotFound,
    /// The store failed or timed out.
    StoreFailure,
    /// The stored destination cannot be sent in a `Location` header.
    UnusableDestination,
}

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The link is live; its counter has been incremented.
    Found {
        destination: String,
        click_count: i64,
    },
    /// Redirect the visitor to the default destination.
    Fallback(FallbackReason),
}

/// Resolves identifiers to destinations, counting each successful lookup.
///
/// Never returns an error: every failure degrades to [`Resolution::Fallback`].
pub struct ResolutionService<S: LinkStore + ?Sized> {
    store: Arc<S>,
    store_timeout: Duration,
}

impl<S: LinkStore + ?Sized> ResolutionService<S> {
    /// Creates a new resolution service.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Overrides the bound applied to each store call.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Looks up `identifier`, increments its click count and returns the
    /// normalized destination.
    pub async fn resolve(&self, identifier: &str) -> Resolution {
        if !is_well_formed_identifier(identifier) {
            debug!(identifier, "Malformed identifier, falling back");
            return Resolution::Fallback(FallbackReason::NotFound);
        }

        match bounded(
            self.store_timeout,
            self.store.find_and_increment(identifier),
        )
        .await
        {
            Ok(Some(record)) => {
                let destination = normalize_destination(&record.destination);

                if HeaderValue::from_str(&destination).is_err() {
                    error!(
                        identifier,
                        "Stored destination is not a valid header value, falling back"
                    );
                    return Resolution::Fallback(FallbackReason::UnusableDestination);
                }

                debug!(identifier, clicks = record.click_count, "Link resolved");
                Resolution::Found {
                    destination,
                    click_count: record.click_count,
                }
            }
            Ok(None) => {
                debug!(identifier, "Link not found or expired, falling back");
                Resolution::Fallback(FallbackReason::NotFound)
            }
            Err(e) => {
                error!("Failed to resolve {}: {}", identifier, e);
                Resolution::Fallback(FallbackReason::StoreFailure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LinkRecord;
    use crate::domain::repositories::{MockLinkStore, StoreError};
    use chrono::Utc;

    fn record(identifier: &str, destination: &str, clicks: i64) -> LinkRecord {
        LinkRecord::new(
            identifier.to_string(),
            destination.to_string(),
            clicks,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut store = MockLinkStore::new();
        store
            .expect_find_and_increment()
            .withf(|id| id == "abc12345")
            .times(1)
            .returning(|id| Ok(Some(record(id, "https://example.com", 1))));

        let resolution = ResolutionService::new(Arc::new(store))
            .resolve("abc12345")
            .await;

        assert_eq!(
            resolution,
            Resolution::Found {
                destination: "https://example.com".to_string(),
                click_count: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_prepends_secure_scheme() {
        let mut store = MockLinkStore::new();
        store
            .expect_find_and_increment()
            .returning(|id| Ok(Some(record(id, "example.com", 3))));

        let resolution = ResolutionService::new(Arc::new(store))
            .resolve("abc12345")
            .await;

        assert!(matches!(
            resolution,
            Resolution::Found { ref destination, .. } if destination == "https://example.com"
        ));
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut store = MockLinkStore::new();
        store.expect_find_and_increment().returning(|_| Ok(None));

        let resolution = ResolutionService::new(Arc::new(store))
            .resolve("doesnotexist")
            .await;

        assert_eq!(resolution, Resolution::Fallback(FallbackReason::NotFound));
    }

    #[tokio::test]
    async fn test_resolve_store_failure_falls_back() {
        let mut store = MockLinkStore::new();
        store
            .expect_find_and_increment()
            .returning(|_| Err(StoreError::Backend("connection refused".to_string())));

        let resolution = ResolutionService::new(Arc::new(store))
            .resolve("abc12345")
            .await;

        assert_eq!(
            resolution,
            Resolution::Fallback(FallbackReason::StoreFailure)
        );
    }

    #[tokio::test]
    async fn test_resolve_control_characters_fall_back() {
        for stored in ["example.com/a\u{7f}b", "example.com/x\ny"] {
            let mut store = MockLinkStore::new();
            store
                .expect_find_and_increment()
                .returning(move |id| Ok(Some(record(id, stored, 1))));

            let resolution = ResolutionService::new(Arc::new(store))
                .resolve("abc12345")
                .await;

            assert_eq!(
                resolution,
                Resolution::Fallback(FallbackReason::UnusableDestination)
            );
        }
    }

    #[tokio::test]
    async fn test_resolve_malformed_identifier_skips_store() {
        let mut store = MockLinkStore::new();
        store.expect_find_and_increment().times(0);

        let resolution = ResolutionService::new(Arc::new(store))
            .resolve("favicon.ico")
            .await;

        assert_eq!(resolution, Resolution::Fallback(FallbackReason::NotFound));
    }
}
