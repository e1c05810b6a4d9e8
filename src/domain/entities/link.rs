//! Link entity representing a stored slug-to-URL mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored short link with its click counter.
///
/// Only `clicks` ever changes after creation, and it only grows.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub slug: String,
    pub destination_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        slug: String,
        destination_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            slug,
            destination_url,
            clicks,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub slug: String,
    pub destination_url: String,
}

/// Result of an atomic conditional insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(Link),
    /// A record with this slug already exists; nothing was written.
    SlugTaken,
}

/// Current click count of one slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SlugClicks {
    pub slug: String,
    pub clicks: i64,
}

/// Store-wide totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct StoreSummary {
    pub links: i64,
    pub clicks: i64,
}
