//! Click event model for asynchronous click accounting.

use chrono::{DateTime, Utc};

/// A single successful redirect waiting to be counted.
///
/// Produced by [`crate::application::services::RedirectService`] and sent over
/// a bounded channel to [`crate::domain::click_worker::run_click_worker`], so
/// the redirect response never waits on the counter write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub slug: String,
    pub occurred_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            occurred_at: Utc::now(),
        }
    }

    /// Time spent in the queue so far, in milliseconds.
    pub fn queued_for_ms(&self) -> i64 {
        (Utc::now() - self.occurred_at).num_milliseconds()
    }
}
