#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    routing::{get, post},
};
use snaplink::api::handlers::{
    health_handler, link_details_handler, redirect_handler, shorten_handler,
};
use snaplink::domain::entities::LinkRecord;
use snaplink::domain::repositories::{LinkStore, StoreError};
use snaplink::infrastructure::persistence::MemoryLinkStore;
use snaplink::state::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL: &str = "https://s.example.com";
pub const FALLBACK_URL: &str = "https://home.example.com/";

pub fn memory_store() -> Arc<MemoryLinkStore> {
    Arc::new(MemoryLinkStore::new())
}

pub fn create_test_state(store: Arc<dyn LinkStore>) -> AppState {
    AppState::new(store, BASE_URL, FALLBACK_URL, Duration::from_secs(1))
}

/// All handlers mounted at their public paths, without rate limiting.
pub fn test_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{identifier}", get(redirect_handler))
        .route("/api/shorten", post(shorten_handler))
        .route("/api/url/{identifier}", get(link_details_handler))
        .with_state(state)
}

/// Store whose every call fails as if the backend were down.
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Backend("connection refused".to_string())
}

#[async_trait]
impl LinkStore for FailingStore {
    async fn insert(&self, _identifier: &str, _destination: &str) -> Result<LinkRecord, StoreError> {
        Err(unavailable())
    }

    async fn find_and_increment(&self, _identifier: &str) -> Result<Option<LinkRecord>, StoreError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _identifier: &str) -> Result<Option<LinkRecord>, StoreError> {
        Err(unavailable())
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

/// Store that reports every identifier as taken.
pub struct CrowdedStore;

#[async_trait]
impl LinkStore for CrowdedStore {
    async fn insert(&self, identifier: &str, _destination: &str) -> Result<LinkRecord, StoreError> {
        Err(StoreError::DuplicateIdentifier(identifier.to_string()))
    }

    async fn find_and_increment(&self, _identifier: &str) -> Result<Option<LinkRecord>, StoreError> {
        Ok(None)
    }

    async fn find_by_id(&self, _identifier: &str) -> Result<Option<LinkRecord>, StoreError> {
        Ok(None)
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Store that commits every insert and then answers too late.
pub struct SlowCommitStore {
    pub inner: Arc<MemoryLinkStore>,
    pub delay: Duration,
}

#[async_trait]
impl LinkStore for SlowCommitStore {
    async fn insert(&self, identifier: &str, destination: &str) -> Result<LinkRecord, StoreError> {
        let record = self.inner.insert(identifier, destination).await?;
        tokio::time::sleep(self.delay).await;
        Ok(record)
    }

    async fn find_and_increment(&self, identifier: &str) -> Result<Option<LinkRecord>, StoreError> {
        self.inner.find_and_increment(identifier).await
    }

    async fn find_by_id(&self, identifier: &str) -> Result<Option<LinkRecord>, StoreError> {
        self.inner.find_by_id(identifier).await
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        self.inner.purge_expired().await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.inner.health_check().await
    }
}
