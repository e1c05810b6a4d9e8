//! Repository trait for link storage.

use std::collections::HashMap;

use crate::domain::entities::{InsertOutcome, Link, NewLink, StoreSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable mapping from slug to destination URL and click counter.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates the link iff its slug is free, as one atomic statement.
    ///
    /// Returns [`InsertOutcome::SlugTaken`] when the slug already exists;
    /// in that case nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError>;

    /// Finds a link by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError>;

    /// Returns click counts for the slugs that exist.
    ///
    /// Unknown slugs are omitted. Duplicates in `slugs` are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn clicks_for_slugs(&self, slugs: &[String]) -> Result<HashMap<String, i64>, AppError>;

    /// Adds one to the click counter.
    ///
    /// Returns `Ok(false)` when no link has this slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, slug: &str) -> Result<bool, AppError>;

    /// Lists the newest links first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn recent(&self, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Totals across all links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn summary(&self) -> Result<StoreSummary, AppError>;

    /// Checks that the store answers queries.
    async fn health_check(&self) -> bool;
}
