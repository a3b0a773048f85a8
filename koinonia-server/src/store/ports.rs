//! Repository traits. Handlers depend on these seams; Postgres provides the
//! production implementations and the integration tests provide in-memory
//! fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use koinonia_model::{
    Comment, ContactMessage, Devotion, Donation, Event, MediaKind,
    MediaRecord, Ministry, NewsItem, Page, PageQuery, PlaybackProgress,
    PrayerRequest, SavedItem, UpdateMediaRecord, UpdateProgressRequest, User,
};
use uuid::Uuid;

use super::Result;

/// Filter for media listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaFilter {
    pub kind: Option<MediaKind>,
    pub live_only: bool,
}

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn list(
        &self,
        filter: MediaFilter,
        page: &PageQuery,
    ) -> Result<Page<MediaRecord>>;

    async fn get(&self, id: Uuid) -> Result<Option<MediaRecord>>;

    /// Fetch a record and bump its view/listen counter in one round trip.
    async fn get_and_increment_views(
        &self,
        id: Uuid,
    ) -> Result<Option<MediaRecord>>;

    async fn create(&self, record: &MediaRecord) -> Result<()>;

    async fn update(
        &self,
        id: Uuid,
        update: &UpdateMediaRecord,
    ) -> Result<Option<MediaRecord>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Flip the live flag, optionally attaching a recorded video source.
    async fn set_live(
        &self,
        id: Uuid,
        is_live: bool,
        video_url: Option<String>,
    ) -> Result<Option<MediaRecord>>;

    /// Case-insensitive substring search over title/speaker/description.
    async fn search(&self, query: &str, limit: u32)
    -> Result<Vec<MediaRecord>>;

    /// Total record count; used by the health endpoint as a liveness probe.
    async fn count_all(&self) -> Result<u64>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn create(&self, user: &User, password_hash: &str) -> Result<()>;

    async fn get_password_hash(&self, user_id: Uuid)
    -> Result<Option<String>>;

    async fn touch_last_login(&self, user_id: Uuid) -> Result<()>;

    async fn store_refresh_token(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Single-use consumption: returns the owning user and revokes the
    /// token when it exists, is unexpired, and was not already revoked.
    async fn consume_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<Uuid>>;

    async fn revoke_refresh_token(&self, token_hash: &str) -> Result<()>;

    async fn blacklist_jti(
        &self,
        jti: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    async fn is_jti_blacklisted(&self, jti: &str) -> Result<bool>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_events(&self, page: &PageQuery) -> Result<Page<Event>>;
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>>;
    async fn create_event(&self, event: &Event) -> Result<()>;
    async fn update_event(&self, event: &Event) -> Result<bool>;
    async fn delete_event(&self, id: Uuid) -> Result<bool>;
    async fn search_events(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Event>>;

    async fn list_devotions(&self, page: &PageQuery)
    -> Result<Page<Devotion>>;
    async fn get_devotion(&self, id: Uuid) -> Result<Option<Devotion>>;
    async fn create_devotion(&self, devotion: &Devotion) -> Result<()>;
    async fn update_devotion(&self, devotion: &Devotion) -> Result<bool>;
    async fn delete_devotion(&self, id: Uuid) -> Result<bool>;

    async fn list_ministries(
        &self,
        page: &PageQuery,
    ) -> Result<Page<Ministry>>;
    async fn get_ministry(&self, id: Uuid) -> Result<Option<Ministry>>;
    async fn create_ministry(&self, ministry: &Ministry) -> Result<()>;
    async fn update_ministry(&self, ministry: &Ministry) -> Result<bool>;
    async fn delete_ministry(&self, id: Uuid) -> Result<bool>;

    async fn list_news(&self, page: &PageQuery) -> Result<Page<NewsItem>>;
    async fn get_news(&self, id: Uuid) -> Result<Option<NewsItem>>;
    async fn create_news(&self, item: &NewsItem) -> Result<()>;
    async fn update_news(&self, item: &NewsItem) -> Result<bool>;
    async fn delete_news(&self, id: Uuid) -> Result<bool>;
    async fn search_news(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<NewsItem>>;
}

#[async_trait]
pub trait EngagementRepository: Send + Sync {
    async fn list_comments(
        &self,
        media_id: Uuid,
        page: &PageQuery,
    ) -> Result<Page<Comment>>;
    async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>>;
    async fn create_comment(&self, comment: &Comment) -> Result<()>;
    async fn delete_comment(&self, id: Uuid) -> Result<bool>;

    async fn create_prayer_request(
        &self,
        request: &PrayerRequest,
    ) -> Result<()>;
    async fn list_prayer_requests(
        &self,
        page: &PageQuery,
    ) -> Result<Page<PrayerRequest>>;

    async fn create_contact_message(
        &self,
        message: &ContactMessage,
    ) -> Result<()>;
}

#[async_trait]
pub trait GivingRepository: Send + Sync {
    async fn create(&self, donation: &Donation) -> Result<()>;
    async fn list(&self, page: &PageQuery) -> Result<Page<Donation>>;
    async fn list_for_user(
        &self,
        user_id: Uuid,
        page: &PageQuery,
    ) -> Result<Page<Donation>>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Upsert the user's progress. Progress past 95% marks the item
    /// completed and removes it from the in-progress set.
    async fn update_progress(
        &self,
        user_id: Uuid,
        request: &UpdateProgressRequest,
    ) -> Result<()>;

    async fn get_progress(
        &self,
        user_id: Uuid,
        media_id: Uuid,
    ) -> Result<Option<PlaybackProgress>>;

    /// In-progress items, most recently touched first.
    async fn continue_listening(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<PlaybackProgress>>;

    async fn clear_progress(
        &self,
        user_id: Uuid,
        media_id: Uuid,
    ) -> Result<()>;

    async fn save_item(&self, user_id: Uuid, media_id: Uuid) -> Result<()>;
    async fn unsave_item(&self, user_id: Uuid, media_id: Uuid)
    -> Result<bool>;
    async fn list_saved(&self, user_id: Uuid) -> Result<Vec<SavedItem>>;
}
