//! Profile endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

const MAX_DISPLAY_NAME_CHARS: usize = 64;

/// GET /api/users/:user_id/profile
pub async fn get(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .db
        .get_profile(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Profile {}", user_id)))?;

    Ok(Json(profile.into()))
}

/// PUT /api/users/:user_id/profile
pub async fn update(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    let display_name = request.display_name.trim();
    if display_name.is_empty() {
        return Err(ApiError::BadRequest("display_name must not be empty".to_string()));
    }
    if display_name.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(ApiError::BadRequest(format!(
            "display_name must be at most {} characters",
            MAX_DISPLAY_NAME_CHARS
        )));
    }

    let profile = state.db.upsert_profile(&user_id, display_name).await?;
    Ok(Json(profile.into()))
}
