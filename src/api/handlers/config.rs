//! Handler for the public client configuration.

use axum::{Json, extract::State};

use crate::api::dto::config::ClientConfigResponse;
use crate::state::AppState;

/// Returns settings the presentation layer needs.
///
/// # Endpoint
///
/// `GET /config`
///
/// ```json
/// { "siteKey": "0x4AAAAAAA..." }
/// ```
pub async fn config_handler(State(state): State<AppState>) -> Json<ClientConfigResponse> {
    Json(ClientConfigResponse {
        site_key: state.settings.turnstile_site_key.clone(),
    })
}
