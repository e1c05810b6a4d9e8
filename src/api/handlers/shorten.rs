//! Handler for the shorten endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a", "slug": "promo", "turnstileToken": "..." }
/// ```
///
/// `slug` is optional; without it a random six-letter slug is generated.
/// `turnstileToken` is required only when bot verification is enabled.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "slug": "promo", "shortUrl": "https://s.example.com/promo" }
/// ```
///
/// # Errors
///
/// - 400 on a malformed body, missing/invalid URL or invalid slug
/// - 403 when bot verification fails (the store is not touched)
/// - 409 `{"error": "slug in use"}` when the custom slug is taken
/// - 500 on store failure or slug exhaustion
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    verify_request(&state, payload.turnstile_token.as_deref()).await?;

    let url = payload.url.unwrap_or_default();
    let link = state
        .allocation_service
        .allocate(&url, payload.slug.as_deref())
        .await?;

    let short_url = state.settings.short_url(&link.slug);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            slug: link.slug,
            short_url,
        }),
    ))
}

/// Runs bot verification when it is enabled.
async fn verify_request(state: &AppState, token: Option<&str>) -> Result<(), AppError> {
    if !state.verifier.is_enabled() {
        return Ok(());
    }

    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::bad_request("Missing verification token", Value::Null))?;

    if state.verifier.verify(token).await? {
        Ok(())
    } else {
        Err(AppError::forbidden("Invalid verification token", Value::Null))
    }
}
