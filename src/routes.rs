//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{slug}`   - Redirect page for a short link
//! - `POST /shorten`  - Create a short link
//! - `POST /stats`    - Click count reconciliation
//! - `GET  /config`   - Public client settings
//! - `GET  /health`   - Health check
//!
//! Static routes win over `/{slug}`; their names are reserved so no link can
//! be shadowed.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive, JSON endpoints only
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/{slug}", get(redirect_handler))
        .merge(api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
