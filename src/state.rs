//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{LinkService, ResolutionService};
use crate::domain::repositories::LinkStore;

/// Services and settings shared across requests.
///
/// Cloning is cheap: every field is reference-counted or small.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkStore>>,
    pub resolution_service: Arc<ResolutionService<dyn LinkStore>>,
    pub store: Arc<dyn LinkStore>,
    /// Redirect target when a link cannot be resolved.
    pub fallback_url: String,
}

impl AppState {
    /// Builds the services over a single store.
    pub fn new(
        store: Arc<dyn LinkStore>,
        base_url: impl Into<String>,
        fallback_url: impl Into<String>,
        store_timeout: Duration,
    ) -> Self {
        let link_service =
            LinkService::new(store.clone(), base_url).with_store_timeout(store_timeout);
        let resolution_service =
            ResolutionService::new(store.clone()).with_store_timeout(store_timeout);

        Self {
            link_service: Arc::new(link_service),
            resolution_service: Arc::new(resolution_service),
            store,
            fallback_url: fallback_url.into(),
        }
    }
}
