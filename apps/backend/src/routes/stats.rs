//! Usage statistics endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::StatsResponse;
use crate::AppState;

/// GET /api/stats
pub async fn get(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let (stats, cached_until) = state.stats.get(&state.db).await?;

    Ok(Json(StatsResponse {
        stats,
        cached_until,
    }))
}
