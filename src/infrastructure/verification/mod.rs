//! Bot verification for shorten requests.
//!
//! Provides a [`BotVerifier`] trait with two implementations:
//! - [`TurnstileVerifier`] - Cloudflare Turnstile `siteverify` client
//! - [`DisabledVerifier`] - Accepts everything when no secret is configured

mod disabled;
mod service;
mod turnstile;

pub use disabled::DisabledVerifier;
#[cfg(test)]
pub use service::MockBotVerifier;
pub use service::BotVerifier;
pub use turnstile::{SITEVERIFY_URL, TurnstileVerifier};
