#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use chrono::Utc;
use shortlink::api::handlers::redirect_handler;
use shortlink::api::routes::api_routes;
use shortlink::domain::click_event::ClickEvent;
use shortlink::domain::entities::{InsertOutcome, Link, NewLink, StoreSummary};
use shortlink::domain::repositories::LinkRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::verification::{BotVerifier, DisabledVerifier};
use shortlink::state::{AppState, ServiceSettings};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Link store kept in memory.
///
/// Insertion checks and writes under one lock, so it is as atomic as the
/// unique constraint in PostgreSQL.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, Link>>,
    next_id: AtomicUsize,
    lookups: AtomicUsize,
    failing: AtomicBool,
    unhealthy: AtomicBool,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a link directly, bypassing allocation.
    pub fn seed(&self, slug: &str, destination_url: &str, clicks: i64) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        self.links.lock().unwrap().insert(
            slug.to_string(),
            Link::new(
                id,
                slug.to_string(),
                destination_url.to_string(),
                clicks,
                Utc::now(),
            ),
        );
    }

    pub fn get(&self, slug: &str) -> Option<Link> {
        self.links.lock().unwrap().get(slug).cloned()
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    /// Number of `find_by_slug` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Makes every store operation fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_unhealthy(&self, unhealthy: bool) {
        self.unhealthy.store(unhealthy, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::internal("Database error", Value::Null))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();
        if links.contains_key(&new_link.slug) {
            return Ok(InsertOutcome::SlugTaken);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let link = Link::new(
            id,
            new_link.slug.clone(),
            new_link.destination_url,
            0,
            Utc::now(),
        );
        links.insert(new_link.slug, link.clone());
        Ok(InsertOutcome::Inserted(link))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.get(slug))
    }

    async fn clicks_for_slugs(&self, slugs: &[String]) -> Result<HashMap<String, i64>, AppError> {
        self.check()?;
        let links = self.links.lock().unwrap();
        Ok(slugs
            .iter()
            .filter_map(|slug| links.get(slug).map(|l| (slug.clone(), l.clicks)))
            .collect())
    }

    async fn increment_clicks(&self, slug: &str) -> Result<bool, AppError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();
        match links.get_mut(slug) {
            Some(link) => {
                link.clicks += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        self.check()?;
        let mut links: Vec<Link> = self.links.lock().unwrap().values().cloned().collect();
        links.sort_by(|a, b| b.id.cmp(&a.id));
        links.truncate(limit.max(0) as usize);
        Ok(links)
    }

    async fn summary(&self) -> Result<StoreSummary, AppError> {
        self.check()?;
        let links = self.links.lock().unwrap();
        Ok(StoreSummary {
            links: links.len() as i64,
            clicks: links.values().map(|l| l.clicks).sum(),
        })
    }

    async fn health_check(&self) -> bool {
        !self.unhealthy.load(Ordering::SeqCst)
    }
}

/// Verifier with a fixed answer that counts its calls.
pub struct StubVerifier {
    pub accept: bool,
    pub calls: AtomicUsize,
}

impl StubVerifier {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BotVerifier for StubVerifier {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn verify(&self, _token: &str) -> Result<bool, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accept)
    }
}

pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        base_url: "https://s.test.com".to_string(),
        redirect_delay_ms: 1500,
        turnstile_site_key: None,
        slug_max_attempts: 10,
    }
}

pub fn create_test_state_with(
    repository: Arc<InMemoryLinkRepository>,
    verifier: Arc<dyn BotVerifier>,
    settings: ServiceSettings,
    queue_capacity: usize,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(queue_capacity);
    let state = AppState::new(repository, tx, verifier, settings);
    (state, rx)
}

pub fn create_test_state(
    repository: Arc<InMemoryLinkRepository>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    create_test_state_with(
        repository,
        Arc::new(DisabledVerifier::new()),
        test_settings(),
        100,
    )
}

/// Same routes as the production router, without path normalization.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/{slug}", get(redirect_handler))
        .merge(api_routes())
        .with_state(state)
}
