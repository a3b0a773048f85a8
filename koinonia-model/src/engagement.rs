//! Engagement records: comments, prayer requests, and contact messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::user::email_is_valid;

/// A comment attached to a media record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Comment {
    pub id: Uuid,
    pub media_id: Uuid,
    pub user_id: Uuid,
    /// Denormalized display name so lists render without a user join.
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub body: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let len = self.body.trim().chars().count();
        if len == 0 {
            return Err(ValidationError::EmptyBody);
        }
        if len > 2000 {
            return Err(ValidationError::Other(
                "comment exceeds 2000 characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// A prayer request. Anonymous submissions carry no `user_id`.
///
/// Private requests are visible only on the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PrayerRequest {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub body: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrayerRequest {
    pub name: String,
    pub body: String,
    #[serde(default)]
    pub is_private: bool,
}

impl NewPrayerRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidDisplayName);
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        Ok(())
    }
}

/// A message sent through the contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
}

impl NewContactMessage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidDisplayName);
        }
        if !email_is_valid(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        Ok(())
    }
}
