//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortLink": "https://s.example.com/Xk3_a9Qz",
///   "identifier": "Xk3_a9Qz"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: `url` missing, empty, or the body is not valid JSON
/// - **500 Internal Server Error**: the store failed or no free identifier was found
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let url = payload.url.unwrap_or_default();
    let created = state.link_service.create_short_link(&url).await?;

    Ok(Json(created.into()))
}
