//! No-op verifier for deployments without bot protection.

use super::service::BotVerifier;
use crate::error::AppError;
use async_trait::async_trait;
use tracing::debug;

/// Accepts every request.
///
/// Used when `TURNSTILE_SECRET_KEY` is not configured, and in tests.
pub struct DisabledVerifier;

impl DisabledVerifier {
    pub fn new() -> Self {
        debug!("Using DisabledVerifier (bot verification off)");
        Self
    }
}

impl Default for DisabledVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BotVerifier for DisabledVerifier {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn verify(&self, _token: &str) -> Result<bool, AppError> {
        Ok(true)
    }
}
