//! CLI administration tool for shortlink.
//!
//! Provides commands for creating and inspecting links, viewing totals,
//! reconciling an exported client history and checking the database without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL, optionally with a custom slug
//! cargo run --bin admin -- link create https://example.com/a --slug promo
//!
//! # Inspect one link or the newest ones
//! cargo run --bin admin -- link show promo
//! cargo run --bin admin -- link list --limit 20
//!
//! # View totals
//! cargo run --bin admin -- stats
//!
//! # Refresh click counts in an exported history file
//! cargo run --bin admin -- history sync history.json
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BASE_URL` (optional): public origin used to print short URLs
//! - `SLUG_MAX_ATTEMPTS` (optional): retry bound for generated slugs

use shortlink::application::services::{AllocationService, StatsService};
use shortlink::domain::history::{self, HistoryEntry};
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::persistence::PgLinkRepository;
use shortlink::state::ServiceSettings;
use shortlink::utils::slug::RandomSlugGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create and inspect links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Reconcile exported client history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Shorten a URL
    Create {
        /// Destination URL (http or https)
        url: String,

        /// Custom slug (random six letters if omitted)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Show one link
    Show {
        slug: String,
    },

    /// List the newest links
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
}

/// History subcommands.
#[derive(Subcommand)]
enum HistoryAction {
    /// Refresh click counts in a history JSON file
    Sync {
        /// Path to the exported history (JSON array)
        file: PathBuf,

        /// Write changes without confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let repository: Arc<dyn LinkRepository> =
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));

    match cli.command {
        Commands::Link { action } => handle_link_action(action, repository).await?,
        Commands::Stats => handle_stats(repository).await?,
        Commands::History { action } => handle_history_action(action, repository).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, repository: Arc<dyn LinkRepository>) -> Result<()> {
    match action {
        LinkAction::Create { url, slug } => create_link(repository, url, slug).await,
        LinkAction::Show { slug } => show_link(repository, slug).await,
        LinkAction::List { limit } => list_links(repository, limit).await,
    }
}

/// Allocates a link exactly as `POST /shorten` does, minus bot verification.
async fn create_link(
    repository: Arc<dyn LinkRepository>,
    url: String,
    slug: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    let settings = ServiceSettings::from_env();
    let service = AllocationService::with_generator(
        repository,
        Arc::new(RandomSlugGenerator),
        settings.slug_max_attempts,
    );

    let link = service
        .allocate(&url, slug.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created".green().bold());
    println!("  Slug:        {}", link.slug.cyan());
    println!("  Short URL:   {}", settings.short_url(&link.slug).bright_yellow());
    println!("  Destination: {}", link.destination_url);
    println!();

    Ok(())
}

async fn show_link(repository: Arc<dyn LinkRepository>, slug: String) -> Result<()> {
    let service = StatsService::new(repository);

    let link = service
        .link_details(&slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load link '{}': {}", slug, e))?;

    println!("{}", "🔎 Link".bright_blue().bold());
    println!();
    println!("  ID:          {}", link.id.to_string().bright_black());
    println!("  Slug:        {}", link.slug.cyan());
    println!("  Destination: {}", link.destination_url);
    println!(
        "  Clicks:      {}",
        link.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Created:     {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    Ok(())
}

/// Lists the newest links.
///
/// # Output Format
///
/// ```text
///   Slug         Clicks   Created            Destination
///   ──────────────────────────────────────────────────────────────────
///   AbCdEf       12       2025-01-15 10:30   https://example.com/a
/// ```
async fn list_links(repository: Arc<dyn LinkRepository>, limit: i64) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = StatsService::new(repository)
        .recent_links(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {:<18} {}",
        "Slug".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<12} {:<8} {:<18} {}",
            link.slug.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.destination_url
        );
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays link and click totals.
async fn handle_stats(repository: Arc<dyn LinkRepository>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let summary = StatsService::new(repository)
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:  {}",
        summary.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        summary.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_history_action(
    action: HistoryAction,
    repository: Arc<dyn LinkRepository>,
) -> Result<()> {
    match action {
        HistoryAction::Sync { file, yes } => sync_history(repository, &file, yes).await,
    }
}

/// Refreshes the click counts of an exported history file.
///
/// # Flow
///
/// 1. Read the JSON array of history entries
/// 2. Reconcile their slugs against the store
/// 3. Merge fresh counts (unknown slugs keep their cached count)
/// 4. Show the changes and confirm (unless `--yes`)
/// 5. Write the file back
async fn sync_history(repository: Arc<dyn LinkRepository>, file: &Path, yes: bool) -> Result<()> {
    println!("{}", "🔄 Sync History".bright_blue().bold());
    println!();

    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let local: Vec<HistoryEntry> =
        serde_json::from_str(&raw).context("History file is not a JSON array of entries")?;

    let slugs = history::slugs_of(&local);
    let stats = StatsService::new(repository)
        .reconcile(&slugs)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to reconcile history: {}", e))?;

    let remote: HashMap<String, i64> = stats.into_iter().map(|s| (s.slug, s.clicks)).collect();
    let (updated, changed) = history::merge(&local, &remote);

    if !changed {
        println!("{}", "✅ History is up to date".green().bold());
        return Ok(());
    }

    for (before, after) in local.iter().zip(&updated) {
        if before.clicks != after.clicks {
            println!(
                "  {:<12} {} → {}",
                after.slug().cyan(),
                before.clicks.to_string().bright_black(),
                after.clicks.to_string().bright_green().bold()
            );
        }
    }
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Write changes to {}?", file.display()))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let json = serde_json::to_string_pretty(&updated)?;
    std::fs::write(file, json).with_context(|| format!("Failed to write {}", file.display()))?;

    println!("{}", "✅ History updated".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
