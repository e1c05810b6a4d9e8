//! Handler for short link redirects.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::{Method, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Intermediate "redirecting" page.
///
/// Renders `templates/redirect.html`. The destination is HTML-escaped into a
/// data attribute; the page script reads it back after `delay_ms`.
#[derive(Template, WebTemplate)]
#[template(path = "redirect.html")]
pub struct RedirectTemplate {
    pub destination: String,
    pub delay_ms: u64,
    /// Whole-second delay for the `<noscript>` refresh.
    pub delay_secs: u64,
}

impl RedirectTemplate {
    pub fn new(destination: String, delay_ms: u64) -> Self {
        Self {
            destination,
            delay_ms,
            delay_secs: delay_ms.div_ceil(1000),
        }
    }
}

/// Resolves a slug and renders the redirect page.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Request Flow
///
/// 1. Asset-like slugs (`favicon.ico`) are answered with 404 immediately
/// 2. The slug is looked up in the store
/// 3. A click event is queued for the background worker (never awaited)
/// 4. The page navigates to the destination after the configured delay
///
/// The response is marked `no-store` so every visit reaches the server and
/// is counted. `HEAD` requests (link previews, crawlers) get the same
/// response but no click.
///
/// # Errors
///
/// Returns 404 `{"error": "not found"}` if the slug doesn't exist.
pub async fn redirect_handler(
    method: Method,
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let redirect = if method == Method::HEAD {
        state.redirect_service.lookup(&slug).await?
    } else {
        state.redirect_service.resolve(&slug).await?
    };

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        RedirectTemplate::new(redirect.destination, state.settings.redirect_delay_ms),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_escapes_destination() {
        let html = RedirectTemplate::new(
            "https://x.com/?a=1&b=\"><script>".to_string(),
            1500,
        )
        .render()
        .unwrap();

        assert!(html.contains("Redirecting you..."));
        assert!(html.contains("data-delay=\"1500\""));
        assert!(!html.contains("\"><script>"));
    }

    #[test]
    fn test_delay_secs_rounds_up() {
        assert_eq!(RedirectTemplate::new(String::new(), 1500).delay_secs, 2);
        assert_eq!(RedirectTemplate::new(String::new(), 0).delay_secs, 0);
        assert_eq!(RedirectTemplate::new(String::new(), 1000).delay_secs, 1);
    }
}
