//! Live broadcasts and their recordings.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use koinonia_model::{
    ApiResponse, MediaKind, MediaRecord, NewMediaRecord, Page, PageQuery,
};
use uuid::Uuid;

use super::media::materialize;
use crate::broadcast::{RecorderError, RecordingSnapshot};
use crate::infra::{AppError, AppResult, AppState};
use crate::store::ports::MediaFilter;

pub async fn list_live(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<MediaRecord>>>> {
    let filter = MediaFilter {
        kind: None,
        live_only: true,
    };
    let result = state.store.media.list(filter, &page).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// Create a live broadcast: a sermon record born with `is_live` set.
pub async fn create_broadcast(
    State(state): State<AppState>,
    Json(mut new): Json<NewMediaRecord>,
) -> AppResult<Json<ApiResponse<MediaRecord>>> {
    new.validate()?;
    if new.stream_url.is_none() {
        return Err(AppError::bad_request(
            "A live broadcast requires a stream_url",
        ));
    }
    new.kind = MediaKind::Sermon;
    new.is_live = true;

    let record = materialize(new);
    state.store.media.create(&record).await?;
    Ok(Json(ApiResponse::success(record)))
}

pub async fn start_recording(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RecordingSnapshot>>> {
    let record = state
        .store
        .media
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Broadcast not found"))?;

    if !record.is_live {
        return Err(AppError::bad_request("Broadcast is not live"));
    }
    let stream_url = record.stream_url.as_deref().ok_or_else(|| {
        AppError::bad_request("Broadcast has no stream URL")
    })?;

    let snapshot = state
        .recorder
        .start(id, stream_url)
        .await
        .map_err(recorder_error)?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// Stop the recorder and hand back the final snapshot; the recording is
/// already attached as the broadcast's VOD source when this returns.
pub async fn stop_recording(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RecordingSnapshot>>> {
    let snapshot =
        state.recorder.stop(id).await.map_err(recorder_error)?;
    Ok(Json(
        ApiResponse::success(snapshot)
            .with_message("Recording stopped".to_string()),
    ))
}

pub async fn recording_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RecordingSnapshot>>> {
    let snapshot = state
        .recorder
        .status(id)
        .ok_or_else(|| AppError::not_found("No recording for broadcast"))?;
    Ok(Json(ApiResponse::success(snapshot)))
}

fn recorder_error(err: RecorderError) -> AppError {
    match err {
        RecorderError::AlreadyRecording => AppError::conflict(err.to_string()),
        RecorderError::NotRecording => AppError::not_found(err.to_string()),
        RecorderError::Spawn(_) => AppError::internal(err.to_string()),
    }
}
