//! Test result endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/users/:user_id/test-results
pub async fn create(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(snapshot): Json<TestResultSnapshot>,
) -> Result<(StatusCode, Json<TestResultResponse>)> {
    check_snapshot(&snapshot).map_err(ApiError::BadRequest)?;

    let row = DbTestResult::from_snapshot(&user_id, &snapshot);
    let stored = state.db.insert_test_result(&row).await?;

    tracing::info!(
        "Stored test result for {}: {}/{} points, {}",
        user_id,
        snapshot.points,
        snapshot.max_points,
        snapshot.level.as_str()
    );

    Ok((StatusCode::CREATED, Json(stored.to_api_result())))
}

/// GET /api/users/:user_id/test-results
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<TestResultListResponse>> {
    let rows = state.db.get_test_results(&user_id).await?;

    Ok(Json(TestResultListResponse {
        results: rows.iter().map(DbTestResult::to_api_result).collect(),
    }))
}
