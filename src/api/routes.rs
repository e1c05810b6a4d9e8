//! JSON API route configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{config_handler, health_handler, shorten_handler, stats_handler};
use crate::api::middleware::cors;
use crate::state::AppState;

/// JSON endpoints, all public and CORS-enabled.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link
/// - `POST /stats`   - Batch click counts for known slugs
/// - `GET  /config`  - Public client settings (Turnstile site key)
/// - `GET  /health`  - Database and click queue status
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats", post(stats_handler))
        .route("/config", get(config_handler))
        .route("/health", get(health_handler))
        .layer(cors::layer())
}
