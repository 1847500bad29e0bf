//! Handler for the link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "custom_code": "launch24" }
/// ```
///
/// `custom_code` is optional; without it a globally unique base-62 code is
/// generated.
///
/// # Errors
///
/// Returns 400 on an invalid URL or malformed custom code and 409 when the
/// custom code is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_short_link(payload.url, payload.custom_code)
        .await?;

    let short_url = state.short_url(&link.code);
    Ok(Json(ShortenResponse::from_link(link, short_url)))
}
