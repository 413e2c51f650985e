//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckState, ComponentHealth, HealthChecks, HealthResponse};
use crate::application::services::{DEFAULT_STORE_TIMEOUT, bounded};
use crate::state::AppState;

/// Reports whether the link store is reachable.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store answered within the timeout
/// - **503 Service Unavailable**: Store failing or timing out
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = check_store(&state).await;

    let (code, status) = match store.status {
        CheckState::Ok => (StatusCode::OK, "healthy"),
        CheckState::Error => (StatusCode::SERVICE_UNAVAILABLE, "degraded"),
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { store },
    };

    (code, Json(response))
}

async fn check_store(state: &AppState) -> ComponentHealth {
    match bounded(DEFAULT_STORE_TIMEOUT, state.store.health_check()).await {
        Ok(()) => ComponentHealth {
            status: CheckState::Ok,
            message: None,
        },
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            ComponentHealth {
                status: CheckState::Error,
                message: Some("Store unavailable".to_string()),
            }
        }
    }
}
