//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::application::services::Resolution;
use crate::state::AppState;

/// Redirects an identifier to its destination.
///
/// # Endpoint
///
/// `GET /{identifier}`
///
/// Always answers `307 Temporary Redirect`. Every successful lookup bumps the
/// link's click count. Unknown, expired or malformed identifiers, as well as
/// store failures, redirect to the configured fallback URL instead of
/// returning an error page.
pub async fn redirect_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
) -> Redirect {
    match state.resolution_service.resolve(&identifier).await {
        Resolution::Found { destination, .. } => Redirect::temporary(&destination),
        Resolution::Fallback(_) => Redirect::temporary(&state.fallback_url),
    }
}
