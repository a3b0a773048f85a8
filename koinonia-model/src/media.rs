//! Media records: sermons, podcasts, and live broadcasts.
//!
//! Sermons (video) and podcasts (audio) share one record shape,
//! discriminated by [`MediaKind`]. A live broadcast is a sermon record with
//! `is_live` set; once its recording is attached the record behaves like any
//! other sermon.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Discriminator between the two content formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "text", rename_all = "snake_case"))]
pub enum MediaKind {
    /// Video-format content (church service recording).
    Sermon,
    /// Audio-format content.
    Podcast,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Sermon => write!(f, "sermon"),
            MediaKind::Podcast => write!(f, "podcast"),
        }
    }
}

/// A sermon or podcast record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MediaRecord {
    pub id: Uuid,
    pub kind: MediaKind,
    pub title: String,
    pub speaker: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Playable video source. Present for sermons and finished broadcasts.
    pub video_url: Option<String>,
    /// Playable audio source. Presence marks the record as audio-format.
    pub audio_url: Option<String>,
    /// Ingest URL for live broadcasts; what the recorder reads from.
    pub stream_url: Option<String>,
    /// Free-text duration as entered by editors ("48 min"), not canonical
    /// seconds. Playback math uses progress payloads instead.
    pub duration_label: Option<String>,
    pub published_at: DateTime<Utc>,
    pub view_count: i64,
    pub is_live: bool,
}

impl MediaRecord {
    /// Audio-format records are exactly those with an audio source.
    pub fn is_audio(&self) -> bool {
        self.audio_url.is_some()
    }
}

/// Payload for creating a media record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMediaRecord {
    pub kind: MediaKind,
    pub title: String,
    pub speaker: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub stream_url: Option<String>,
    pub duration_label: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_live: bool,
}

impl NewMediaRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }
}

/// Partial update for a media record. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMediaRecord {
    pub title: Option<String>,
    pub speaker: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub stream_url: Option<String>,
    pub duration_label: Option<String>,
    pub is_live: Option<bool>,
}

impl UpdateMediaRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.trim().chars().count();
    if len == 0 || len > 200 {
        return Err(ValidationError::InvalidTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(audio_url: Option<&str>) -> MediaRecord {
        MediaRecord {
            id: Uuid::new_v4(),
            kind: MediaKind::Podcast,
            title: "Walking in Grace".to_string(),
            speaker: Some("Pastor Amos".to_string()),
            description: None,
            thumbnail_url: None,
            video_url: None,
            audio_url: audio_url.map(str::to_string),
            stream_url: None,
            duration_label: Some("32 min".to_string()),
            published_at: Utc::now(),
            view_count: 0,
            is_live: false,
        }
    }

    #[test]
    fn audio_format_is_discriminated_by_audio_url() {
        assert!(record(Some("https://cdn.example/ep1.mp3")).is_audio());
        assert!(!record(None).is_audio());
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&MediaKind::Sermon).unwrap();
        assert_eq!(json, "\"sermon\"");
    }

    #[test]
    fn new_record_rejects_blank_title() {
        let new = NewMediaRecord {
            kind: MediaKind::Sermon,
            title: "   ".to_string(),
            speaker: None,
            description: None,
            thumbnail_url: None,
            video_url: None,
            audio_url: None,
            stream_url: None,
            duration_label: None,
            published_at: None,
            is_live: false,
        };
        assert!(new.validate().is_err());
    }
}
