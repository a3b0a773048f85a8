//! Cross-collection search.

use axum::{
    Json,
    extract::{Query, State},
};
use koinonia_model::{ApiResponse, MediaKind, SearchResults};
use serde::Deserialize;

use crate::infra::{AppError, AppResult, AppState};

const SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SearchResults>>> {
    let needle = query.q.trim();
    if needle.is_empty() {
        return Err(AppError::bad_request("Query parameter 'q' is required"));
    }

    let media = state.store.media.search(needle, SEARCH_LIMIT * 2).await?;
    let (sermons, podcasts) = media
        .into_iter()
        .partition(|record| record.kind == MediaKind::Sermon);

    let events = state
        .store
        .catalog
        .search_events(needle, SEARCH_LIMIT)
        .await?;
    let news = state
        .store
        .catalog
        .search_news(needle, SEARCH_LIMIT)
        .await?;

    Ok(Json(ApiResponse::success(SearchResults {
        sermons,
        podcasts,
        events,
        news,
    })))
}
