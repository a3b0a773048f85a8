//! Comments, prayer requests, and the contact form.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use koinonia_model::{
    ApiResponse, Comment, ContactMessage, NewComment, NewContactMessage,
    NewPrayerRequest, Page, PageQuery, PrayerRequest, User,
};
use uuid::Uuid;

use crate::infra::{AppError, AppResult, AppState};

pub async fn list_comments(
    State(state): State<AppState>,
    Path(media_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<Comment>>>> {
    if state.store.media.get(media_id).await?.is_none() {
        return Err(AppError::not_found("Media not found"));
    }
    let result = state
        .store
        .engagement
        .list_comments(media_id, &page)
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(media_id): Path<Uuid>,
    Json(new): Json<NewComment>,
) -> AppResult<Json<ApiResponse<Comment>>> {
    new.validate()?;
    if state.store.media.get(media_id).await?.is_none() {
        return Err(AppError::not_found("Media not found"));
    }

    let comment = Comment {
        id: Uuid::new_v4(),
        media_id,
        user_id: user.id,
        author_name: user.display_name.clone(),
        body: new.body.trim().to_string(),
        created_at: Utc::now(),
    };
    state.store.engagement.create_comment(&comment).await?;
    Ok(Json(ApiResponse::success(comment)))
}

/// Authors may delete their own comments; admins may delete any.
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let comment = state
        .store
        .engagement
        .get_comment(id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment not found"))?;

    if comment.user_id != user.id && !user.is_admin {
        return Err(AppError::forbidden(
            "Only the author or an admin may delete a comment",
        ));
    }

    state.store.engagement.delete_comment(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// Anonymous submissions are allowed; a bearer token attributes the request.
pub async fn create_prayer_request(
    State(state): State<AppState>,
    user: Option<Extension<User>>,
    Json(new): Json<NewPrayerRequest>,
) -> AppResult<Json<ApiResponse<PrayerRequest>>> {
    new.validate()?;

    let request = PrayerRequest {
        id: Uuid::new_v4(),
        user_id: user.map(|Extension(u)| u.id),
        name: new.name.trim().to_string(),
        body: new.body.trim().to_string(),
        is_private: new.is_private,
        created_at: Utc::now(),
    };
    state
        .store
        .engagement
        .create_prayer_request(&request)
        .await?;
    Ok(Json(ApiResponse::success(request)))
}

pub async fn list_prayer_requests(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<PrayerRequest>>>> {
    let result = state.store.engagement.list_prayer_requests(&page).await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn create_contact_message(
    State(state): State<AppState>,
    Json(new): Json<NewContactMessage>,
) -> AppResult<Json<ApiResponse<ContactMessage>>> {
    new.validate()?;

    let message = ContactMessage {
        id: Uuid::new_v4(),
        name: new.name.trim().to_string(),
        email: new.email.trim().to_string(),
        subject: new.subject,
        body: new.body,
        created_at: Utc::now(),
    };
    state
        .store
        .engagement
        .create_contact_message(&message)
        .await?;
    Ok(Json(
        ApiResponse::success(message)
            .with_message("Message received".to_string()),
    ))
}
