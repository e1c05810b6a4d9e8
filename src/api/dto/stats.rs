//! DTOs for click count reconciliation.

use serde::{Deserialize, Serialize};

use crate::domain::entities::SlugClicks;

#[derive(Debug, Default, Deserialize)]
pub struct StatsRequest {
    #[serde(default)]
    pub slugs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: Vec<SlugClicks>,
}
