//! Cross-origin policy for the JSON endpoints.

use tower_http::cors::CorsLayer;

/// Permissive CORS: any origin, method and header.
///
/// The JSON endpoints are called from a browser page that may be served
/// from a different origin than the API.
pub fn layer() -> CorsLayer {
    CorsLayer::permissive()
}
