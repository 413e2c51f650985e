//! Business logic services for the application layer.

pub mod link_service;
pub mod resolution_service;

pub use link_service::{CreatedLink, LinkService};
pub use resolution_service::{FallbackReason, Resolution, ResolutionService};

use std::future::Future;
use std::time::Duration;

use crate::domain::repositories::StoreError;

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs a store call, failing with [`StoreError::Timeout`] instead of
/// waiting past `limit`.
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}
