//! Cloudflare Turnstile verifier.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, warn};

use super::service::BotVerifier;
use crate::error::AppError;

/// Turnstile token verification endpoint.
pub const SITEVERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

#[derive(Serialize)]
struct SiteverifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
}

#[derive(Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Verifies tokens against the Turnstile `siteverify` API.
pub struct TurnstileVerifier {
    client: Client,
    secret: String,
    endpoint: String,
}

impl TurnstileVerifier {
    /// Creates a verifier for the given secret key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the HTTP client cannot be built.
    pub fn new(secret: impl Into<String>) -> Result<Self, AppError> {
        Self::with_endpoint(secret, SITEVERIFY_URL)
    }

    /// Creates a verifier talking to a custom endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the HTTP client cannot be built.
    pub fn with_endpoint(
        secret: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                AppError::internal(
                    "Failed to build verification client",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(Self {
            client,
            secret: secret.into(),
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl BotVerifier for TurnstileVerifier {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn verify(&self, token: &str) -> Result<bool, AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SiteverifyRequest {
                secret: &self.secret,
                response: token,
            })
            .send()
            .await
            .map_err(|e| {
                error!("Turnstile request failed: {}", e);
                AppError::internal("Verification service unavailable", Value::Null)
            })?;

        let body: SiteverifyResponse = response.json().await.map_err(|e| {
            error!("Unreadable Turnstile response: {}", e);
            AppError::internal("Verification service unavailable", Value::Null)
        })?;

        if body.success {
            debug!("Turnstile token accepted");
        } else {
            warn!(codes = ?body.error_codes, "Turnstile token rejected");
        }

        Ok(body.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_siteverify_request_shape() {
        let body = serde_json::to_value(SiteverifyRequest {
            secret: "s3cret",
            response: "tok",
        })
        .unwrap();

        assert_eq!(body, json!({ "secret": "s3cret", "response": "tok" }));
    }

    #[test]
    fn test_siteverify_response_parsing() {
        let ok: SiteverifyResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(ok.success);
        assert!(ok.error_codes.is_empty());

        let rejected: SiteverifyResponse =
            serde_json::from_str(r#"{"success":false,"error-codes":["invalid-input-response"]}"#)
                .unwrap();
        assert!(!rejected.success);
        assert_eq!(rejected.error_codes, vec!["invalid-input-response"]);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_internal_error() {
        let verifier = TurnstileVerifier::with_endpoint("secret", "http://127.0.0.1:9/siteverify")
            .unwrap();

        assert!(verifier.is_enabled());
        let err = verifier.verify("token").await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
