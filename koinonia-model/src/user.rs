//! User accounts and authentication payloads.
//!
//! ## Authentication flow
//!
//! 1. **Registration**: users create an account with username and password
//! 2. **Login**: credentials are verified, returning a JWT access token and
//!    an opaque refresh token
//! 3. **Refresh**: access tokens (15 min) are rotated via refresh tokens
//!    (30 days); refresh tokens are single-use
//! 4. **Logout**: the access token's `jti` is blacklisted and the refresh
//!    token revoked
//!
//! Passwords are hashed with Argon2id and never serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Unique username (lowercase, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Display name shown in clients
    pub display_name: String,
    /// Optional email address
    pub email: Option<String>,
    /// Optional URL to the user's profile picture
    pub avatar_url: Option<String>,
    /// Whether the user may use the admin surface
    pub is_admin: bool,
    /// Whether the account is active
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Login request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username (case-insensitive)
    pub username: String,
    pub password: String,
}

/// Registration request payload. The username is normalized to lowercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub email: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let username_len = self.username.chars().count();
        if !(3..=30).contains(&username_len) {
            return Err(ValidationError::InvalidUsername);
        }
        if !self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ValidationError::InvalidUsername);
        }
        if self.password.chars().count() < 8 {
            return Err(ValidationError::PasswordTooShort);
        }
        let display_len = self.display_name.trim().chars().count();
        if !(1..=100).contains(&display_len) {
            return Err(ValidationError::InvalidDisplayName);
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

// Deliberately loose: one '@' with something on both sides. Mail delivery
// is the real validator.
fn validate_email(email: &str) -> Result<(), ValidationError> {
    let mut parts = email.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain))
            if !local.is_empty() && domain.contains('.') =>
        {
            Ok(())
        }
        _ => Err(ValidationError::InvalidEmail),
    }
}

pub(crate) fn email_is_valid(email: &str) -> bool {
    validate_email(email).is_ok()
}

/// Token pair returned by register/login/refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    /// Expiration time (Unix seconds)
    pub exp: i64,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// JWT id, used for revocation
    pub jti: String,
}

/// Authentication errors surfaced to clients.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Internal error")]
    InternalError,
}
