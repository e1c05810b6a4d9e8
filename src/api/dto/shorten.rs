//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten one URL.
///
/// `url` is optional at the serde level so a missing field is reported as a
/// validation error (400) instead of a deserialization rejection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(
        required(message = "URL is required"),
        length(min = 1, max = 2048, message = "URL must be 1-2048 characters")
    )]
    pub url: Option<String>,

    /// Optional custom slug; empty means "generate one".
    #[validate(length(max = 64, message = "Slug must be 1-64 characters"))]
    pub slug: Option<String>,

    /// Token issued by the bot verification widget.
    pub turnstile_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub slug: String,
    pub short_url: String,
}
