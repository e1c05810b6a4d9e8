//! Click statistics and reconciliation service.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::{Link, SlugClicks, StoreSummary};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for reading click counts.
///
/// [`StatsService::reconcile`] backs `POST /stats`, which clients use to
/// refresh cached counts. The other methods serve the admin CLI.
pub struct StatsService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: LinkRepository + ?Sized> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the current click count of every known slug in `slugs`.
    ///
    /// Each known slug appears once, in order of first appearance. Unknown
    /// slugs are left out; an empty input never reaches the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn reconcile(&self, slugs: &[String]) -> Result<Vec<SlugClicks>, AppError> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }

        let counts = self.repository.clicks_for_slugs(slugs).await?;

        let mut seen = HashSet::with_capacity(counts.len());
        Ok(slugs
            .iter()
            .filter_map(|slug| {
                let clicks = *counts.get(slug)?;
                seen.insert(slug.as_str()).then(|| SlugClicks {
                    slug: slug.clone(),
                    clicks,
                })
            })
            .collect())
    }

    /// Retrieves one link with its counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this slug.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn link_details(&self, slug: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("not found", json!({ "slug": slug })))
    }

    /// Lists the newest links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn recent_links(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        self.repository.recent(limit.clamp(1, 1000)).await
    }

    /// Totals across the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn summary(&self) -> Result<StoreSummary, AppError> {
        self.repository.summary().await
    }
}
