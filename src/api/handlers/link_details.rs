//! Handler for link details endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::LinkDetailsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a live link with its click count. Does not count as a click.
///
/// # Endpoint
///
/// `GET /api/url/{identifier}`
///
/// # Response
///
/// ```json
/// {
///   "destination": "https://example.com",
///   "identifier": "Xk3_a9Qz",
///   "clickCount": 2,
///   "createdAt": "2026-01-15T10:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// - **404 Not Found**: identifier unknown or expired
/// - **500 Internal Server Error**: store failure
pub async fn link_details_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkDetailsResponse>, AppError> {
    let record = state.link_service.get_link_details(&identifier).await?;

    Ok(Json(record.into()))
}
