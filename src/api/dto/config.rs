//! DTO for the public client configuration.

use serde::Serialize;

/// Settings the presentation layer needs before rendering the shorten form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfigResponse {
    /// Public Turnstile site key, `null` when verification is disabled.
    pub site_key: Option<String>,
}
