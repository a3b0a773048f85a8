//! Sermon, podcast, and live-broadcast endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use koinonia_model::{
    ApiResponse, MediaKind, MediaRecord, NewMediaRecord, Page, PageQuery,
    UpdateMediaRecord,
};
use uuid::Uuid;

use crate::infra::{AppError, AppResult, AppState};
use crate::store::ports::MediaFilter;

pub async fn list_sermons(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<MediaRecord>>>> {
    list_by_kind(&state, MediaKind::Sermon, &page).await
}

pub async fn list_podcasts(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<MediaRecord>>>> {
    list_by_kind(&state, MediaKind::Podcast, &page).await
}

async fn list_by_kind(
    state: &AppState,
    kind: MediaKind,
    page: &PageQuery,
) -> AppResult<Json<ApiResponse<Page<MediaRecord>>>> {
    let filter = MediaFilter {
        kind: Some(kind),
        live_only: false,
    };
    let result = state.store.media.list(filter, page).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// Fetching a record counts as one view.
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MediaRecord>>> {
    let record = state
        .store
        .media
        .get_and_increment_views(id)
        .await?
        .ok_or_else(|| AppError::not_found("Media not found"))?;
    Ok(Json(ApiResponse::success(record)))
}

pub async fn create_media(
    State(state): State<AppState>,
    Json(new): Json<NewMediaRecord>,
) -> AppResult<Json<ApiResponse<MediaRecord>>> {
    new.validate()?;
    let record = materialize(new);
    state.store.media.create(&record).await?;
    Ok(Json(ApiResponse::success(record)))
}

pub async fn update_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateMediaRecord>,
) -> AppResult<Json<ApiResponse<MediaRecord>>> {
    update.validate()?;
    let record = state
        .store
        .media
        .update(id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("Media not found"))?;
    Ok(Json(ApiResponse::success(record)))
}

pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !state.store.media.delete(id).await? {
        return Err(AppError::not_found("Media not found"));
    }
    Ok(Json(ApiResponse::success(())))
}

pub(crate) fn materialize(new: NewMediaRecord) -> MediaRecord {
    MediaRecord {
        id: Uuid::new_v4(),
        kind: new.kind,
        title: new.title.trim().to_string(),
        speaker: new.speaker,
        description: new.description,
        thumbnail_url: new.thumbnail_url,
        video_url: new.video_url,
        audio_url: new.audio_url,
        stream_url: new.stream_url,
        duration_label: new.duration_label,
        published_at: new.published_at.unwrap_or_else(chrono::Utc::now),
        view_count: 0,
        is_live: new.is_live,
    }
}
