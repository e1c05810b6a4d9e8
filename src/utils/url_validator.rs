//! Destination URL validation.
//!
//! Destinations are checked, never normalized. Allocation trims surrounding
//! whitespace before validating; the trimmed string is what gets stored and
//! returned on redirect.

use url::Url;

/// Longest destination URL accepted.
pub const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DestinationUrlError {
    #[error("URL is required")]
    Missing,

    #[error("URL exceeds {MAX_URL_LENGTH} bytes")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Checks that `input` is a non-blank absolute HTTP(S) URL.
///
/// # Errors
///
/// Returns [`DestinationUrlError`] describing the first failed rule.
pub fn validate_destination_url(input: &str) -> Result<(), DestinationUrlError> {
    if input.trim().is_empty() {
        return Err(DestinationUrlError::Missing);
    }

    if input.len() > MAX_URL_LENGTH {
        return Err(DestinationUrlError::TooLong);
    }

    let url = Url::parse(input).map_err(|e| DestinationUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(DestinationUrlError::UnsupportedProtocol),
    }
}
