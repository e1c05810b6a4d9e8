//! Client-side link history and its reconciliation against server counts.
//!
//! A history is the list of links a client created, cached locally with
//! possibly stale click counts. [`merge`] folds fresh counts from
//! `POST /stats` into it without ever discarding local data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One locally cached link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub original_url: String,
    pub short_url: String,
    pub date: String,
    #[serde(default)]
    pub clicks: i64,
}

impl HistoryEntry {
    /// The slug is the last path segment of the short URL.
    pub fn slug(&self) -> &str {
        self.short_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

/// Slugs of a history, in order, ready for a stats request.
pub fn slugs_of(history: &[HistoryEntry]) -> Vec<String> {
    history
        .iter()
        .map(|entry| entry.slug().to_string())
        .filter(|slug| !slug.is_empty())
        .collect()
}

/// Applies server click counts to a local history.
///
/// Entries whose slug is missing from `remote` keep their cached count.
/// Returns the updated history and whether any entry changed.
pub fn merge(local: &[HistoryEntry], remote: &HashMap<String, i64>) -> (Vec<HistoryEntry>, bool) {
    let mut changed = false;

    let updated = local
        .iter()
        .map(|entry| match remote.get(entry.slug()) {
            Some(&clicks) if clicks != entry.clicks => {
                changed = true;
                HistoryEntry {
                    clicks,
                    ..entry.clone()
                }
            }
            _ => entry.clone(),
        })
        .collect();

    (updated, changed)
}
