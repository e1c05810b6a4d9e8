//! Background worker applying click increments.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Drains click events and increments the stored counters.
///
/// Each event is applied in its own task; at most `concurrency` increments
/// run at once. Failures are logged and the click is discarded, never retried.
///
/// Returns once every sender is dropped and in-flight increments finished.
pub async fn run_click_worker<R>(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<R>,
    concurrency: usize,
) where
    R: LinkRepository + ?Sized + 'static,
{
    let limiter = Arc::new(Semaphore::new(concurrency.max(1)));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = limiter.clone().acquire_owned().await else {
            break;
        };
        let repository = repository.clone();

        tokio::spawn(async move {
            apply_click(repository.as_ref(), &event).await;
            drop(permit);
        });
    }

    // Wait for in-flight increments before reporting shutdown.
    let _ = limiter.acquire_many(concurrency.max(1) as u32).await;
    info!("Click worker stopped");
}

async fn apply_click<R>(repository: &R, event: &ClickEvent)
where
    R: LinkRepository + ?Sized,
{
    match repository.increment_clicks(&event.slug).await {
        Ok(true) => debug!(
            slug = %event.slug,
            queued_ms = event.queued_for_ms(),
            "Click recorded"
        ),
        Ok(false) => warn!(slug = %event.slug, "Click for unknown slug ignored"),
        Err(e) => {
            metrics::counter!("shortlink_click_failures_total").increment(1);
            error!(slug = %event.slug, "Failed to record click: {}", e);
        }
    }
}
