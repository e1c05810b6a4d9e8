//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AllocationService, RedirectService, StatsService};
use crate::config::{Config, non_empty_var, parse_or};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::verification::BotVerifier;
use crate::utils::slug::RandomSlugGenerator;

/// Runtime settings the HTTP layer needs.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Public origin without a trailing slash.
    pub base_url: String,
    pub redirect_delay_ms: u64,
    pub turnstile_site_key: Option<String>,
    pub slug_max_attempts: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            redirect_delay_ms: 1500,
            turnstile_site_key: None,
            slug_max_attempts: 10,
        }
    }
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            redirect_delay_ms: config.redirect_delay_ms,
            turnstile_site_key: config.turnstile_site_key.clone(),
            slug_max_attempts: config.slug_max_attempts,
        }
    }
}

impl ServiceSettings {
    /// Reads settings straight from the environment, for tools that run
    /// without a full [`Config`] such as the admin CLI.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: non_empty_var("BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            redirect_delay_ms: parse_or("REDIRECT_DELAY_MS", defaults.redirect_delay_ms),
            turnstile_site_key: non_empty_var("TURNSTILE_SITE_KEY"),
            slug_max_attempts: parse_or("SLUG_MAX_ATTEMPTS", defaults.slug_max_attempts).max(1),
        }
    }

    /// Full short URL for a slug.
    pub fn short_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), slug)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub allocation_service: Arc<AllocationService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    pub stats_service: Arc<StatsService<dyn LinkRepository>>,
    pub repository: Arc<dyn LinkRepository>,
    pub verifier: Arc<dyn BotVerifier>,
    pub settings: Arc<ServiceSettings>,
}

impl AppState {
    /// Wires the services around one repository and click queue.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        click_sender: mpsc::Sender<ClickEvent>,
        verifier: Arc<dyn BotVerifier>,
        settings: ServiceSettings,
    ) -> Self {
        let allocation_service = AllocationService::with_generator(
            repository.clone(),
            Arc::new(RandomSlugGenerator),
            settings.slug_max_attempts,
        );

        Self {
            allocation_service: Arc::new(allocation_service),
            redirect_service: Arc::new(RedirectService::new(repository.clone(), click_sender)),
            stats_service: Arc::new(StatsService::new(repository.clone())),
            repository,
            verifier,
            settings: Arc::new(settings),
        }
    }
}
