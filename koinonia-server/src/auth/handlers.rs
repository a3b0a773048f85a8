//! Registration, login, refresh, and logout.

use axum::{Extension, Json, extract::State};
use chrono::{DateTime, Duration, Utc};
use koinonia_model::{
    ApiResponse, AuthToken, LoginRequest, RegisterRequest, User,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::jwt::{generate_refresh_token, hash_refresh_token};
use super::password::{hash_password, verify_password};
use crate::infra::{AppError, AppResult, AppState};
use crate::store::StoreError;

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<AuthToken>>> {
    request.validate()?;

    let username = request.username.to_lowercase();
    if state
        .store
        .users
        .get_by_username(&username)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("Username already taken"));
    }

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        username: username.clone(),
        display_name: request.display_name.trim().to_string(),
        email: request.email.clone(),
        avatar_url: None,
        is_admin: false,
        is_active: true,
        created_at: now,
        updated_at: now,
        last_login: None,
    };

    let password_hash = hash_password(&request.password)?;
    match state.store.users.create(&user, &password_hash).await {
        Ok(()) => {}
        // Raced with a concurrent registration for the same name.
        Err(StoreError::Conflict(_)) => {
            return Err(AppError::conflict("Username already taken"));
        }
        Err(other) => return Err(other.into()),
    }

    info!(username = %username, "user registered");
    let token = issue_tokens(&state, user.id).await?;
    Ok(Json(ApiResponse::success(token)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthToken>>> {
    let username = request.username.to_lowercase();

    // Uniform failure message so login probes cannot enumerate usernames.
    let invalid = || AppError::unauthorized("Invalid credentials");

    let user = state
        .store
        .users
        .get_by_username(&username)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(invalid());
    }

    let hash = state
        .store
        .users
        .get_password_hash(user.id)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&request.password, &hash) {
        return Err(invalid());
    }

    state.store.users.touch_last_login(user.id).await?;
    info!(username = %username, "user logged in");

    let token = issue_tokens(&state, user.id).await?;
    Ok(Json(ApiResponse::success(token)))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<AuthToken>>> {
    let token_hash = hash_refresh_token(&request.refresh_token);
    let user_id = state
        .store
        .users
        .consume_refresh_token(&token_hash)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid token"))?;

    let token = issue_tokens(&state, user_id).await?;
    Ok(Json(ApiResponse::success(token)))
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    bearer: BearerClaims,
    Json(request): Json<LogoutRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let expires_at = DateTime::<Utc>::from_timestamp(bearer.0.exp, 0)
        .unwrap_or_else(Utc::now);
    state
        .store
        .users
        .blacklist_jti(&bearer.0.jti, expires_at)
        .await?;

    if let Some(refresh_token) = &request.refresh_token {
        let token_hash = hash_refresh_token(refresh_token);
        state
            .store
            .users
            .revoke_refresh_token(&token_hash)
            .await?;
    }

    info!(username = %user.username, "user logged out");
    Ok(Json(
        ApiResponse::success(()).with_message("Logged out".to_string()),
    ))
}

pub async fn get_current_user(
    Extension(user): Extension<User>,
) -> Json<ApiResponse<User>> {
    Json(ApiResponse::success(user))
}

async fn issue_tokens(
    state: &AppState,
    user_id: Uuid,
) -> AppResult<AuthToken> {
    let access_token = state.jwt.generate_access_token(user_id)?;
    let refresh_token = generate_refresh_token();

    let expires_at =
        Utc::now() + Duration::days(state.config.auth.refresh_token_ttl_days);
    state
        .store
        .users
        .store_refresh_token(
            &hash_refresh_token(&refresh_token),
            user_id,
            expires_at,
        )
        .await?;

    Ok(AuthToken {
        access_token,
        refresh_token,
        expires_in: state.jwt.access_token_ttl_secs(),
    })
}

/// Re-validated bearer claims for handlers that need the `jti` after the
/// auth middleware already admitted the request.
pub struct BearerClaims(pub koinonia_model::Claims);

impl axum::extract::FromRequestParts<AppState> for BearerClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;
        let claims = state.jwt.validate_access_token(token)?;
        Ok(Self(claims))
    }
}
