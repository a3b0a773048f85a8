//! Playback progress and saved-item payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's last-known position within a media item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PlaybackProgress {
    pub media_id: Uuid,
    /// Elapsed seconds.
    pub position: f32,
    /// Total seconds as reported by the client's media element.
    pub duration: f32,
    pub updated_at: DateTime<Utc>,
}

impl PlaybackProgress {
    /// Completion ratio in `[0, 1]`; zero-duration payloads never arrive
    /// past handler validation.
    pub fn percentage(&self) -> f32 {
        (self.position / self.duration).clamp(0.0, 1.0)
    }
}

/// Progress report sent by clients every few seconds during playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProgressRequest {
    pub media_id: Uuid,
    pub position: f32,
    pub duration: f32,
}

/// A media record a user bookmarked for later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SavedItem {
    pub media_id: Uuid,
    pub saved_at: DateTime<Utc>,
}
