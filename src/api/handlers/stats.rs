//! Handler for click count reconciliation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::debug;

use crate::api::dto::stats::{StatsRequest, StatsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns current click counts for a batch of slugs.
///
/// # Endpoint
///
/// `POST /stats`
///
/// # Request Body
///
/// ```json
/// { "slugs": ["AbCdEf", "promo"] }
/// ```
///
/// # Response
///
/// ```json
/// { "stats": [ { "slug": "promo", "clicks": 3 } ] }
/// ```
///
/// Unknown slugs are omitted. An empty or unreadable body yields
/// `{"stats": []}` rather than an error.
///
/// # Errors
///
/// Returns 500 on store failure.
pub async fn stats_handler(
    State(state): State<AppState>,
    payload: Result<Json<StatsRequest>, JsonRejection>,
) -> Result<Json<StatsResponse>, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Unreadable stats request: {}", rejection.body_text());
            StatsRequest::default()
        }
    };

    let stats = state.stats_service.reconcile(&request.slugs).await?;

    Ok(Json(StatsResponse { stats }))
}
