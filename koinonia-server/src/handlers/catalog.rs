//! Events, devotions, ministries, and news endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use koinonia_model::{
    ApiResponse, Devotion, Event, Ministry, NewDevotion, NewEvent,
    NewMinistry, NewNewsItem, NewsItem, Page, PageQuery,
};
use uuid::Uuid;

use crate::infra::{AppError, AppResult, AppState};

// Events

pub async fn list_events(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<Event>>>> {
    let result = state.store.catalog.list_events(&page).await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Event>>> {
    let event = state
        .store
        .catalog
        .get_event(id)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;
    Ok(Json(ApiResponse::success(event)))
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(new): Json<NewEvent>,
) -> AppResult<Json<ApiResponse<Event>>> {
    new.validate()?;
    let event = Event {
        id: Uuid::new_v4(),
        title: new.title.trim().to_string(),
        description: new.description,
        location: new.location,
        starts_at: new.starts_at,
        ends_at: new.ends_at,
        thumbnail_url: new.thumbnail_url,
    };
    state.store.catalog.create_event(&event).await?;
    Ok(Json(ApiResponse::success(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(new): Json<NewEvent>,
) -> AppResult<Json<ApiResponse<Event>>> {
    new.validate()?;
    let event = Event {
        id,
        title: new.title.trim().to_string(),
        description: new.description,
        location: new.location,
        starts_at: new.starts_at,
        ends_at: new.ends_at,
        thumbnail_url: new.thumbnail_url,
    };
    if !state.store.catalog.update_event(&event).await? {
        return Err(AppError::not_found("Event not found"));
    }
    Ok(Json(ApiResponse::success(event)))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !state.store.catalog.delete_event(id).await? {
        return Err(AppError::not_found("Event not found"));
    }
    Ok(Json(ApiResponse::success(())))
}

// Devotions

pub async fn list_devotions(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<Devotion>>>> {
    let result = state.store.catalog.list_devotions(&page).await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn get_devotion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Devotion>>> {
    let devotion = state
        .store
        .catalog
        .get_devotion(id)
        .await?
        .ok_or_else(|| AppError::not_found("Devotion not found"))?;
    Ok(Json(ApiResponse::success(devotion)))
}

pub async fn create_devotion(
    State(state): State<AppState>,
    Json(new): Json<NewDevotion>,
) -> AppResult<Json<ApiResponse<Devotion>>> {
    new.validate()?;
    let devotion = Devotion {
        id: Uuid::new_v4(),
        title: new.title.trim().to_string(),
        body: new.body,
        scripture_reference: new.scripture_reference,
        author: new.author,
        published_at: new.published_at.unwrap_or_else(Utc::now),
    };
    state.store.catalog.create_devotion(&devotion).await?;
    Ok(Json(ApiResponse::success(devotion)))
}

pub async fn update_devotion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(new): Json<NewDevotion>,
) -> AppResult<Json<ApiResponse<Devotion>>> {
    new.validate()?;
    let existing = state
        .store
        .catalog
        .get_devotion(id)
        .await?
        .ok_or_else(|| AppError::not_found("Devotion not found"))?;
    let devotion = Devotion {
        id,
        title: new.title.trim().to_string(),
        body: new.body,
        scripture_reference: new.scripture_reference,
        author: new.author,
        published_at: new.published_at.unwrap_or(existing.published_at),
    };
    if !state.store.catalog.update_devotion(&devotion).await? {
        return Err(AppError::not_found("Devotion not found"));
    }
    Ok(Json(ApiResponse::success(devotion)))
}

pub async fn delete_devotion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !state.store.catalog.delete_devotion(id).await? {
        return Err(AppError::not_found("Devotion not found"));
    }
    Ok(Json(ApiResponse::success(())))
}

// Ministries

pub async fn list_ministries(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<Ministry>>>> {
    let result = state.store.catalog.list_ministries(&page).await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn get_ministry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Ministry>>> {
    let ministry = state
        .store
        .catalog
        .get_ministry(id)
        .await?
        .ok_or_else(|| AppError::not_found("Ministry not found"))?;
    Ok(Json(ApiResponse::success(ministry)))
}

pub async fn create_ministry(
    State(state): State<AppState>,
    Json(new): Json<NewMinistry>,
) -> AppResult<Json<ApiResponse<Ministry>>> {
    new.validate()?;
    let ministry = Ministry {
        id: Uuid::new_v4(),
        name: new.name.trim().to_string(),
        description: new.description,
        leader: new.leader,
        contact_email: new.contact_email,
        thumbnail_url: new.thumbnail_url,
    };
    state.store.catalog.create_ministry(&ministry).await?;
    Ok(Json(ApiResponse::success(ministry)))
}

pub async fn update_ministry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(new): Json<NewMinistry>,
) -> AppResult<Json<ApiResponse<Ministry>>> {
    new.validate()?;
    let ministry = Ministry {
        id,
        name: new.name.trim().to_string(),
        description: new.description,
        leader: new.leader,
        contact_email: new.contact_email,
        thumbnail_url: new.thumbnail_url,
    };
    if !state.store.catalog.update_ministry(&ministry).await? {
        return Err(AppError::not_found("Ministry not found"));
    }
    Ok(Json(ApiResponse::success(ministry)))
}

pub async fn delete_ministry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !state.store.catalog.delete_ministry(id).await? {
        return Err(AppError::not_found("Ministry not found"));
    }
    Ok(Json(ApiResponse::success(())))
}

// News

pub async fn list_news(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<NewsItem>>>> {
    let result = state.store.catalog.list_news(&page).await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<NewsItem>>> {
    let item = state
        .store
        .catalog
        .get_news(id)
        .await?
        .ok_or_else(|| AppError::not_found("News item not found"))?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn create_news(
    State(state): State<AppState>,
    Json(new): Json<NewNewsItem>,
) -> AppResult<Json<ApiResponse<NewsItem>>> {
    new.validate()?;
    let item = NewsItem {
        id: Uuid::new_v4(),
        title: new.title.trim().to_string(),
        body: new.body,
        thumbnail_url: new.thumbnail_url,
        published_at: new.published_at.unwrap_or_else(Utc::now),
    };
    state.store.catalog.create_news(&item).await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(new): Json<NewNewsItem>,
) -> AppResult<Json<ApiResponse<NewsItem>>> {
    new.validate()?;
    let existing = state
        .store
        .catalog
        .get_news(id)
        .await?
        .ok_or_else(|| AppError::not_found("News item not found"))?;
    let item = NewsItem {
        id,
        title: new.title.trim().to_string(),
        body: new.body,
        thumbnail_url: new.thumbnail_url,
        published_at: new.published_at.unwrap_or(existing.published_at),
    };
    if !state.store.catalog.update_news(&item).await? {
        return Err(AppError::not_found("News item not found"));
    }
    Ok(Json(ApiResponse::success(item)))
}

pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !state.store.catalog.delete_news(id).await? {
        return Err(AppError::not_found("News item not found"));
    }
    Ok(Json(ApiResponse::success(())))
}
