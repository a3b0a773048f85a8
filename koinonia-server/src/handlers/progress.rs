//! Playback progress and saved items.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use koinonia_model::{
    ApiResponse, PlaybackProgress, SavedItem, UpdateProgressRequest, User,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::infra::{AppError, AppResult, AppState};

pub async fn update_progress(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateProgressRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !request.position.is_finite()
        || !request.duration.is_finite()
        || request.position < 0.0
        || request.duration <= 0.0
    {
        return Err(AppError::bad_request(
            "position and duration must be finite and positive",
        ));
    }
    if state.store.media.get(request.media_id).await?.is_none() {
        return Err(AppError::not_found("Media not found"));
    }

    state
        .store
        .progress
        .update_progress(user.id, &request)
        .await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(media_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PlaybackProgress>>> {
    let progress = state
        .store
        .progress
        .get_progress(user.id, media_id)
        .await?
        .ok_or_else(|| AppError::not_found("No progress recorded"))?;
    Ok(Json(ApiResponse::success(progress)))
}

#[derive(Debug, Deserialize)]
pub struct ContinueQuery {
    #[serde(default = "default_continue_limit")]
    pub limit: u32,
}

fn default_continue_limit() -> u32 {
    10
}

pub async fn continue_listening(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<ContinueQuery>,
) -> AppResult<Json<ApiResponse<Vec<PlaybackProgress>>>> {
    let limit = query.limit.clamp(1, 50);
    let items = state
        .store
        .progress
        .continue_listening(user.id, limit)
        .await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn clear_progress(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(media_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .store
        .progress
        .clear_progress(user.id, media_id)
        .await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn save_item(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(media_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    if state.store.media.get(media_id).await?.is_none() {
        return Err(AppError::not_found("Media not found"));
    }
    state.store.progress.save_item(user.id, media_id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn unsave_item(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(media_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !state.store.progress.unsave_item(user.id, media_id).await? {
        return Err(AppError::not_found("Item was not saved"));
    }
    Ok(Json(ApiResponse::success(())))
}

pub async fn list_saved(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> AppResult<Json<ApiResponse<Vec<SavedItem>>>> {
    let items = state.store.progress.list_saved(user.id).await?;
    Ok(Json(ApiResponse::success(items)))
}
