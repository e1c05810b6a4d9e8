//! Short link allocation service.

use std::sync::Arc;

use crate::domain::entities::{InsertOutcome, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::slug::{RandomSlugGenerator, SlugGenerator, validate_custom_slug};
use crate::utils::url_validator::validate_destination_url;
use serde_json::json;
use tracing::{debug, info, warn};

/// Default bound on generated-slug collisions before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Turns shorten requests into stored links.
///
/// Custom slugs are inserted once and never altered; generated slugs are
/// retried on collision up to a fixed bound. Every insert is the store's
/// atomic conditional write, so concurrent requests for the same slug cannot
/// both succeed.
pub struct AllocationService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    generator: Arc<dyn SlugGenerator>,
    max_attempts: usize,
}

impl<R: LinkRepository + ?Sized> AllocationService<R> {
    /// Creates a service using random slugs and the default retry bound.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_generator(
            repository,
            Arc::new(RandomSlugGenerator),
            DEFAULT_MAX_ATTEMPTS,
        )
    }

    /// Creates a service with an explicit slug source and retry bound.
    pub fn with_generator(
        repository: Arc<R>,
        generator: Arc<dyn SlugGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a short link for `destination_url`.
    ///
    /// An empty `requested_slug` counts as absent.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL or the custom slug is invalid
    /// - [`AppError::Conflict`] if the custom slug is taken
    /// - [`AppError::AllocationExhausted`] if every generated candidate collided
    /// - [`AppError::Internal`] on store failures
    pub async fn allocate(
        &self,
        destination_url: &str,
        requested_slug: Option<&str>,
    ) -> Result<Link, AppError> {
        let destination_url = destination_url.trim();
        validate_destination_url(destination_url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "url": destination_url }))
        })?;

        let link = match requested_slug.filter(|s| !s.is_empty()) {
            Some(slug) => self.allocate_custom(destination_url, slug).await?,
            None => self.allocate_generated(destination_url).await?,
        };

        metrics::counter!("shortlink_links_created_total").increment(1);
        info!(slug = %link.slug, "Short link created");

        Ok(link)
    }

    async fn allocate_custom(&self, destination_url: &str, slug: &str) -> Result<Link, AppError> {
        validate_custom_slug(slug)?;

        match self.insert(slug, destination_url).await? {
            InsertOutcome::Inserted(link) => Ok(link),
            InsertOutcome::SlugTaken => {
                debug!(slug, "Custom slug already taken");
                Err(AppError::conflict("slug in use", json!({ "slug": slug })))
            }
        }
    }

    async fn allocate_generated(&self, destination_url: &str) -> Result<Link, AppError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();

            match self.insert(&candidate, destination_url).await? {
                InsertOutcome::Inserted(link) => return Ok(link),
                InsertOutcome::SlugTaken => {
                    metrics::counter!("shortlink_slug_collisions_total").increment(1);
                    debug!(slug = %candidate, attempt, "Generated slug collided");
                }
            }
        }

        warn!(
            attempts = self.max_attempts,
            "Gave up allocating a generated slug"
        );
        Err(AppError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }

    async fn insert(&self, slug: &str, destination_url: &str) -> Result<InsertOutcome, AppError> {
        self.repository
            .insert(NewLink {
                slug: slug.to_string(),
                destination_url: destination_url.to_string(),
            })
            .await
    }
}
