//! Bot verifier trait.

use async_trait::async_trait;

use crate::error::AppError;

/// Verifies that a shorten request comes from a human.
///
/// Verification runs before any store access, so a slow third-party call
/// never holds up the link store.
///
/// # Implementations
///
/// - [`crate::infrastructure::verification::TurnstileVerifier`] - Cloudflare Turnstile
/// - [`crate::infrastructure::verification::DisabledVerifier`] - Accepts everything
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BotVerifier: Send + Sync {
    /// Whether requests must carry a verification token.
    fn is_enabled(&self) -> bool;

    /// Checks a client token.
    ///
    /// Returns `Ok(false)` when the provider rejects the token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the provider cannot be reached or
    /// answers with something unreadable.
    async fn verify(&self, token: &str) -> Result<bool, AppError>;
}
