//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{identifier}`             - Short link redirect
//! - `GET  /health`                   - Store health check
//! - `POST /api/shorten`              - Create a short link (rate limited)
//! - `GET  /api/url/{identifier}`     - Link details
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on link creation
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let shorten_routes = if behind_proxy {
        api::routes::shorten_routes().layer(rate_limit::proxied_layer())
    } else {
        api::routes::shorten_routes().layer(rate_limit::layer())
    };

    let api_router = Router::new()
        .merge(shorten_routes)
        .merge(api::routes::link_routes());

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/{identifier}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
