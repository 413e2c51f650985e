//! API route configuration.

use crate::api::handlers::{link_details_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link creation routes. Rate limiting is applied by the caller.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link
pub fn shorten_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}

/// Read-only link routes.
///
/// # Endpoints
///
/// - `GET /url/{identifier}` - Link details with click count
pub fn link_routes() -> Router<AppState> {
    Router::new().route("/url/{identifier}", get(link_details_handler))
}
