//! Word like endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/users/:user_id/likes
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<LikesResponse>> {
    let likes = state.db.get_likes(&user_id).await?;

    Ok(Json(LikesResponse {
        word_ids: likes.into_iter().map(|like| like.word_id).collect(),
    }))
}

/// PUT /api/users/:user_id/likes/:word_id
pub async fn like(
    State(state): State<AppState>,
    Path((user_id, word_id)): Path<(String, String)>,
) -> Result<Json<LikeChangeResponse>> {
    state.db.add_like(&user_id, &word_id).await?;

    Ok(Json(LikeChangeResponse {
        word_id,
        liked: true,
    }))
}

/// DELETE /api/users/:user_id/likes/:word_id
pub async fn unlike(
    State(state): State<AppState>,
    Path((user_id, word_id)): Path<(String, String)>,
) -> Result<Json<LikeChangeResponse>> {
    if !state.db.remove_like(&user_id, &word_id).await? {
        tracing::debug!("{} had not liked {}", user_id, word_id);
    }

    Ok(Json(LikeChangeResponse {
        word_id,
        liked: false,
    }))
}
