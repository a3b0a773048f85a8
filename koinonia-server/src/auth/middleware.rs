use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use koinonia_model::User;

use crate::infra::{AppError, AppState};

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request)?;
    let user = validate_and_get_user(&state, &token).await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Attaches the user when a valid token is present, otherwise passes the
/// request through anonymously.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Ok(token) = extract_bearer_token(&request)
        && let Ok(user) = validate_and_get_user(&state, &token).await
    {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

/// Must run after `auth_middleware` in the layer stack.
pub async fn admin_middleware(
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<User>()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    if !user.is_admin {
        return Err(AppError::forbidden("Admin access required"));
    }

    Ok(next.run(request).await)
}

fn extract_bearer_token(request: &Request) -> Result<String, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::unauthorized("Missing authorization header")
        })?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::unauthorized("Malformed authorization header")
        })
}

async fn validate_and_get_user(
    state: &AppState,
    token: &str,
) -> Result<User, AppError> {
    let claims = state.jwt.validate_access_token(token)?;

    if state.store.users.is_jti_blacklisted(&claims.jti).await? {
        return Err(AppError::unauthorized("Token has been revoked"));
    }

    let user = state
        .store
        .users
        .get_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::unauthorized("Unknown user"))?;

    if !user.is_active {
        return Err(AppError::unauthorized("Account is deactivated"));
    }

    Ok(user)
}
