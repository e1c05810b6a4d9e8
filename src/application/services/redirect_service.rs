//! Slug resolution and click dispatch.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::slug::is_asset_like;

/// Where a slug points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub slug: String,
    pub destination: String,
}

/// Resolves slugs and hands click accounting to the background worker.
///
/// The click is offered to the channel with `try_send`: a full or closed
/// queue drops the click, it never delays or fails the redirect.
pub struct RedirectService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    click_sender: mpsc::Sender<ClickEvent>,
}

impl<R: LinkRepository + ?Sized> RedirectService<R> {
    pub fn new(repository: Arc<R>, click_sender: mpsc::Sender<ClickEvent>) -> Self {
        Self {
            repository,
            click_sender,
        }
    }

    /// Looks up `slug` and schedules its click increment.
    ///
    /// Asset-like slugs (containing a dot) are answered with `NotFound`
    /// without a store lookup.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link has this slug
    /// - [`AppError::Internal`] on store failures
    pub async fn resolve(&self, slug: &str) -> Result<Redirect, AppError> {
        let redirect = self.lookup(slug).await?;
        self.dispatch_click(&redirect.slug);
        Ok(redirect)
    }

    /// Looks up `slug` without counting a click.
    ///
    /// Used for `HEAD` requests, which link previewers and crawlers send
    /// without a visitor behind them.
    ///
    /// # Errors
    ///
    /// Same as [`RedirectService::resolve`].
    pub async fn lookup(&self, slug: &str) -> Result<Redirect, AppError> {
        if slug.is_empty() || is_asset_like(slug) {
            debug!(slug, "Ignoring asset-like slug");
            return Err(not_found(slug));
        }

        let link = self
            .repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found(slug))?;

        Ok(Redirect {
            slug: link.slug,
            destination: link.destination_url,
        })
    }

    /// Whether the click worker is still receiving events.
    pub fn click_queue_open(&self) -> bool {
        !self.click_sender.is_closed()
    }

    /// Free slots in the click queue.
    pub fn click_queue_capacity(&self) -> usize {
        self.click_sender.capacity()
    }

    fn dispatch_click(&self, slug: &str) {
        match self.click_sender.try_send(ClickEvent::new(slug)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("shortlink_clicks_dropped_total").increment(1);
                warn!(slug = %event.slug, "Click queue full, click dropped");
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("shortlink_clicks_dropped_total").increment(1);
                error!(slug = %event.slug, "Click queue closed, click dropped");
            }
        }
    }
}

fn not_found(slug: &str) -> AppError {
    AppError::not_found("not found", json!({ "slug": slug }))
}
