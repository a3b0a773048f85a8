use axum::{Json, extract::State};
use koinonia_model::ApiResponse;
use serde_json::{Value, json};

use crate::infra::{AppResult, AppState};

pub async fn ping() -> &'static str {
    "pong"
}

/// Liveness plus a cheap database round trip.
pub async fn health(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let media_count = state.store.media.count_all().await?;
    Ok(Json(ApiResponse::success(json!({
        "database": "ok",
        "media_count": media_count,
    }))))
}
