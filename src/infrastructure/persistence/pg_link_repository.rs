//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{InsertOutcome, Link, NewLink, SlugClicks, StoreSummary};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and click counters.
///
/// Slug uniqueness is enforced by the `links_slug_key` constraint; inserts
/// use `ON CONFLICT DO NOTHING` so a taken slug comes back as an empty result
/// rather than an error.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let row = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (slug, destination_url)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT links_slug_key DO NOTHING
            RETURNING id, slug, destination_url, clicks, created_at
            "#,
        )
        .bind(&new_link.slug)
        .bind(&new_link.destination_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(match row {
            Some(link) => InsertOutcome::Inserted(link),
            None => InsertOutcome::SlugTaken,
        })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, slug, destination_url, clicks, created_at
            FROM links
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn clicks_for_slugs(&self, slugs: &[String]) -> Result<HashMap<String, i64>, AppError> {
        if slugs.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, SlugClicks>(
            r#"
            SELECT slug, clicks
            FROM links
            WHERE slug = ANY($1)
            "#,
        )
        .bind(slugs)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(|r| (r.slug, r.clicks)).collect())
    }

    async fn increment_clicks(&self, slug: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE links SET clicks = clicks + 1 WHERE slug = $1")
            .bind(slug)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, slug, destination_url, clicks, created_at
            FROM links
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn summary(&self) -> Result<StoreSummary, AppError> {
        let summary = sqlx::query_as::<_, StoreSummary>(
            r#"
            SELECT COUNT(*) AS links, COALESCE(SUM(clicks), 0)::BIGINT AS clicks
            FROM links
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(summary)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
