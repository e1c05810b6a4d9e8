use sqlx::PgPool;
use std::sync::Arc;
use shortlink::domain::entities::{InsertOutcome, Link, NewLink};
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::persistence::PgLinkRepository;

fn new_link(slug: &str, url: &str) -> NewLink {
    NewLink {
        slug: slug.to_string(),
        destination_url: url.to_string(),
    }
}

#[sqlx::test]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let outcome = repo
        .insert(new_link("abcdef", "https://example.com"))
        .await
        .unwrap();

    let InsertOutcome::Inserted(link) = outcome else {
        panic!("expected insert");
    };
    assert_eq!(link.slug, "abcdef");
    assert_eq!(link.clicks, 0);

    let found = repo.find_by_slug("abcdef").await.unwrap().unwrap();
    assert_eq!(found.destination_url, "https://example.com");
}

#[sqlx::test]
async fn test_insert_taken_slug_leaves_original(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("promo", "https://example.com/1"))
        .await
        .unwrap();
    let second = repo
        .insert(new_link("promo", "https://example.com/2"))
        .await
        .unwrap();

    assert_eq!(second, InsertOutcome::SlugTaken);
    let kept = repo.find_by_slug("promo").await.unwrap().unwrap();
    assert_eq!(kept.destination_url, "https://example.com/1");
}

#[sqlx::test]
async fn test_find_missing(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_slug("nothere").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_increment_clicks(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert(new_link("count", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.increment_clicks("count").await.unwrap());
    assert!(repo.increment_clicks("count").await.unwrap());
    assert!(!repo.increment_clicks("missing").await.unwrap());

    let link = repo.find_by_slug("count").await.unwrap().unwrap();
    assert_eq!(link.clicks, 2);
}

#[sqlx::test]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.insert(new_link("hot", "https://example.com"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks("hot").await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    assert_eq!(repo.find_by_slug("hot").await.unwrap().unwrap().clicks, 20);
}

#[sqlx::test]
async fn test_clicks_for_slugs(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert(new_link("one", "https://example.com/1"))
        .await
        .unwrap();
    repo.insert(new_link("two", "https://example.com/2"))
        .await
        .unwrap();
    repo.increment_clicks("two").await.unwrap();

    let counts = repo
        .clicks_for_slugs(&["one".to_string(), "two".to_string(), "nope".to_string()])
        .await
        .unwrap();

    assert_eq!(counts.len(), 2);
    assert_eq!(counts["one"], 0);
    assert_eq!(counts["two"], 1);
}

#[sqlx::test]
async fn test_recent_and_summary(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    for slug in ["first", "second", "third"] {
        repo.insert(new_link(slug, "https://example.com"))
            .await
            .unwrap();
    }
    repo.increment_clicks("second").await.unwrap();

    let recent = repo.recent(2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].slug, "third");

    let summary = repo.summary().await.unwrap();
    assert_eq!(summary.links, 3);
    assert_eq!(summary.clicks, 1);
    assert!(repo.health_check().await);
}

#[sqlx::test]
async fn test_concurrent_same_slug_single_winner(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));

    const CONTENDERS: usize = 16;
    let handles: Vec<_> = (0..CONTENDERS)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.insert(new_link("contested", &format!("https://example.com/{i}")))
                    .await
            })
        })
        .collect();

    let mut winners: Vec<Link> = Vec::new();
    let mut taken = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            InsertOutcome::Inserted(link) => winners.push(link),
            InsertOutcome::SlugTaken => taken += 1,
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(taken, CONTENDERS - 1);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE slug = 'contested'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let stored = repo.find_by_slug("contested").await.unwrap().unwrap();
    assert_eq!(stored.destination_url, winners[0].destination_url);
}
