//! Catalog records: events, devotions, ministries, and news.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::media::validate_title;

/// A scheduled church event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub thumbnail_url: Option<String>,
}

impl NewEvent {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        if let Some(ends_at) = self.ends_at
            && ends_at < self.starts_at
        {
            return Err(ValidationError::Other(
                "event cannot end before it starts".to_string(),
            ));
        }
        Ok(())
    }
}

/// A daily devotion entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Devotion {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub scripture_reference: Option<String>,
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDevotion {
    pub title: String,
    pub body: String,
    pub scripture_reference: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl NewDevotion {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        if self.body.trim().is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        Ok(())
    }
}

/// A ministry or small group within the church.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ministry {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub leader: Option<String>,
    pub contact_email: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMinistry {
    pub name: String,
    pub description: Option<String>,
    pub leader: Option<String>,
    pub contact_email: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl NewMinistry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.name)?;
        if let Some(email) = &self.contact_email
            && !crate::user::email_is_valid(email)
        {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// A news / announcement post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub thumbnail_url: Option<String>,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNewsItem {
    pub title: String,
    pub body: String,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl NewNewsItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        if self.body.trim().is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        Ok(())
    }
}
