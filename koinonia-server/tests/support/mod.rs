//! Shared test harness: an in-memory store behind the repository seams and
//! an `axum_test` server wrapping the full router.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use koinonia_config::{ConfigLoad, ConfigLoader};
use koinonia_model::{
    Comment, ContactMessage, Devotion, Donation, Event, MediaKind,
    MediaRecord, Ministry, NewsItem, Page, PageQuery, PlaybackProgress,
    PrayerRequest, SavedItem, UpdateMediaRecord, UpdateProgressRequest, User,
};
use koinonia_server::store::ports::{
    CatalogRepository, EngagementRepository, GivingRepository, MediaFilter,
    MediaRepository, ProgressRepository, UserRepository,
};
use koinonia_server::store::{Result, Store, StoreError};
use koinonia_server::{AppState, create_app};
use serde_json::json;
use uuid::Uuid;

/// A stand-in for the real ffmpeg binary: runs until killed, like a
/// stream copy of an ongoing broadcast would.
fn write_ffmpeg_stub(dir: &std::path::Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("ffmpeg-stub");
    std::fs::write(&path, "#!/bin/sh\nexec sleep 30\n").expect("stub");
    let mut perms =
        std::fs::metadata(&path).expect("stub metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("stub perms");
    path
}

fn paginate<T: Clone>(items: Vec<T>, page: &PageQuery) -> Page<T> {
    let total = items.len() as u64;
    let start = (page.offset() as usize).min(items.len());
    let end = (start + page.limit() as usize).min(items.len());
    Page::new(items[start..end].to_vec(), page, total)
}

fn matches_needle(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(needle))
        .unwrap_or(false)
}

// Media

#[derive(Default)]
pub struct InMemoryMedia {
    pub records: Mutex<HashMap<Uuid, MediaRecord>>,
}

#[async_trait]
impl MediaRepository for InMemoryMedia {
    async fn list(
        &self,
        filter: MediaFilter,
        page: &PageQuery,
    ) -> Result<Page<MediaRecord>> {
        let records = self.records.lock().unwrap();
        let mut items: Vec<_> = records
            .values()
            .filter(|r| filter.kind.is_none_or(|k| r.kind == k))
            .filter(|r| !filter.live_only || r.is_live)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(paginate(items, page))
    }

    async fn get(&self, id: Uuid) -> Result<Option<MediaRecord>> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn get_and_increment_views(
        &self,
        id: Uuid,
    ) -> Result<Option<MediaRecord>> {
        let mut records = self.records.lock().unwrap();
        Ok(records.get_mut(&id).map(|r| {
            r.view_count += 1;
            r.clone()
        }))
    }

    async fn create(&self, record: &MediaRecord) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        update: &UpdateMediaRecord,
    ) -> Result<Option<MediaRecord>> {
        let mut records = self.records.lock().unwrap();
        Ok(records.get_mut(&id).map(|r| {
            macro_rules! apply {
                ($field:ident) => {
                    if let Some(value) = update.$field.clone() {
                        r.$field = Some(value);
                    }
                };
            }
            if let Some(title) = update.title.clone() {
                r.title = title;
            }
            apply!(speaker);
            apply!(description);
            apply!(thumbnail_url);
            apply!(video_url);
            apply!(audio_url);
            apply!(stream_url);
            apply!(duration_label);
            if let Some(is_live) = update.is_live {
                r.is_live = is_live;
            }
            r.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.records.lock().unwrap().remove(&id).is_some())
    }

    async fn set_live(
        &self,
        id: Uuid,
        is_live: bool,
        video_url: Option<String>,
    ) -> Result<Option<MediaRecord>> {
        let mut records = self.records.lock().unwrap();
        Ok(records.get_mut(&id).map(|r| {
            r.is_live = is_live;
            if let Some(url) = video_url {
                r.video_url = Some(url);
            }
            r.clone()
        }))
    }

    async fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<MediaRecord>> {
        let needle = query.to_lowercase();
        let records = self.records.lock().unwrap();
        let mut hits: Vec<_> = records
            .values()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || matches_needle(r.speaker.as_deref(), &needle)
                    || matches_needle(r.description.as_deref(), &needle)
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        hits.truncate(limit as usize);
        Ok(hits)
    }

    async fn count_all(&self) -> Result<u64> {
        Ok(self.records.lock().unwrap().len() as u64)
    }
}

// Users

#[derive(Default)]
pub struct InMemoryUsers {
    pub users: Mutex<HashMap<Uuid, User>>,
    pub credentials: Mutex<HashMap<Uuid, String>>,
    refresh_tokens: Mutex<HashMap<String, RefreshEntry>>,
    blacklist: Mutex<HashMap<String, DateTime<Utc>>>,
}

struct RefreshEntry {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    revoked: bool,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &User, password_hash: &str) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!(
                "username '{}' already taken",
                user.username
            )));
        }
        users.insert(user.id, user.clone());
        self.credentials
            .lock()
            .unwrap()
            .insert(user.id, password_hash.to_string());
        Ok(())
    }

    async fn get_password_hash(
        &self,
        user_id: Uuid,
    ) -> Result<Option<String>> {
        Ok(self.credentials.lock().unwrap().get(&user_id).cloned())
    }

    async fn touch_last_login(&self, user_id: Uuid) -> Result<()> {
        if let Some(user) = self.users.lock().unwrap().get_mut(&user_id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }

    async fn store_refresh_token(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        self.refresh_tokens.lock().unwrap().insert(
            token_hash.to_string(),
            RefreshEntry {
                user_id,
                expires_at,
                revoked: false,
            },
        );
        Ok(())
    }

    async fn consume_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<Uuid>> {
        let mut tokens = self.refresh_tokens.lock().unwrap();
        match tokens.get_mut(token_hash) {
            Some(entry)
                if !entry.revoked && entry.expires_at > Utc::now() =>
            {
                entry.revoked = true;
                Ok(Some(entry.user_id))
            }
            _ => Ok(None),
        }
    }

    async fn revoke_refresh_token(&self, token_hash: &str) -> Result<()> {
        if let Some(entry) =
            self.refresh_tokens.lock().unwrap().get_mut(token_hash)
        {
            entry.revoked = true;
        }
        Ok(())
    }

    async fn blacklist_jti(
        &self,
        jti: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        self.blacklist
            .lock()
            .unwrap()
            .insert(jti.to_string(), expires_at);
        Ok(())
    }

    async fn is_jti_blacklisted(&self, jti: &str) -> Result<bool> {
        Ok(self
            .blacklist
            .lock()
            .unwrap()
            .get(jti)
            .is_some_and(|expires_at| *expires_at > Utc::now()))
    }
}

// Catalog

#[derive(Default)]
pub struct InMemoryCatalog {
    pub events: Mutex<HashMap<Uuid, Event>>,
    pub devotions: Mutex<HashMap<Uuid, Devotion>>,
    pub ministries: Mutex<HashMap<Uuid, Ministry>>,
    pub news: Mutex<HashMap<Uuid, NewsItem>>,
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list_events(&self, page: &PageQuery) -> Result<Page<Event>> {
        let mut items: Vec<_> =
            self.events.lock().unwrap().values().cloned().collect();
        items.sort_by(|a, b| a.starts_at.cmp(&b.starts_at));
        Ok(paginate(items, page))
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        Ok(self.events.lock().unwrap().get(&id).cloned())
    }

    async fn create_event(&self, event: &Event) -> Result<()> {
        self.events.lock().unwrap().insert(event.id, event.clone());
        Ok(())
    }

    async fn update_event(&self, event: &Event) -> Result<bool> {
        let mut events = self.events.lock().unwrap();
        if !events.contains_key(&event.id) {
            return Ok(false);
        }
        events.insert(event.id, event.clone());
        Ok(true)
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool> {
        Ok(self.events.lock().unwrap().remove(&id).is_some())
    }

    async fn search_events(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Event>> {
        let needle = query.to_lowercase();
        let mut hits: Vec<_> = self
            .events
            .lock()
            .unwrap()
            .values()
            .filter(|e| {
                e.title.to_lowercase().contains(&needle)
                    || matches_needle(e.description.as_deref(), &needle)
            })
            .cloned()
            .collect();
        hits.truncate(limit as usize);
        Ok(hits)
    }

    async fn list_devotions(
        &self,
        page: &PageQuery,
    ) -> Result<Page<Devotion>> {
        let mut items: Vec<_> =
            self.devotions.lock().unwrap().values().cloned().collect();
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(paginate(items, page))
    }

    async fn get_devotion(&self, id: Uuid) -> Result<Option<Devotion>> {
        Ok(self.devotions.lock().unwrap().get(&id).cloned())
    }

    async fn create_devotion(&self, devotion: &Devotion) -> Result<()> {
        self.devotions
            .lock()
            .unwrap()
            .insert(devotion.id, devotion.clone());
        Ok(())
    }

    async fn update_devotion(&self, devotion: &Devotion) -> Result<bool> {
        let mut devotions = self.devotions.lock().unwrap();
        if !devotions.contains_key(&devotion.id) {
            return Ok(false);
        }
        devotions.insert(devotion.id, devotion.clone());
        Ok(true)
    }

    async fn delete_devotion(&self, id: Uuid) -> Result<bool> {
        Ok(self.devotions.lock().unwrap().remove(&id).is_some())
    }

    async fn list_ministries(
        &self,
        page: &PageQuery,
    ) -> Result<Page<Ministry>> {
        let mut items: Vec<_> =
            self.ministries.lock().unwrap().values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(items, page))
    }

    async fn get_ministry(&self, id: Uuid) -> Result<Option<Ministry>> {
        Ok(self.ministries.lock().unwrap().get(&id).cloned())
    }

    async fn create_ministry(&self, ministry: &Ministry) -> Result<()> {
        self.ministries
            .lock()
            .unwrap()
            .insert(ministry.id, ministry.clone());
        Ok(())
    }

    async fn update_ministry(&self, ministry: &Ministry) -> Result<bool> {
        let mut ministries = self.ministries.lock().unwrap();
        if !ministries.contains_key(&ministry.id) {
            return Ok(false);
        }
        ministries.insert(ministry.id, ministry.clone());
        Ok(true)
    }

    async fn delete_ministry(&self, id: Uuid) -> Result<bool> {
        Ok(self.ministries.lock().unwrap().remove(&id).is_some())
    }

    async fn list_news(&self, page: &PageQuery) -> Result<Page<NewsItem>> {
        let mut items: Vec<_> =
            self.news.lock().unwrap().values().cloned().collect();
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(paginate(items, page))
    }

    async fn get_news(&self, id: Uuid) -> Result<Option<NewsItem>> {
        Ok(self.news.lock().unwrap().get(&id).cloned())
    }

    async fn create_news(&self, item: &NewsItem) -> Result<()> {
        self.news.lock().unwrap().insert(item.id, item.clone());
        Ok(())
    }

    async fn update_news(&self, item: &NewsItem) -> Result<bool> {
        let mut news = self.news.lock().unwrap();
        if !news.contains_key(&item.id) {
            return Ok(false);
        }
        news.insert(item.id, item.clone());
        Ok(true)
    }

    async fn delete_news(&self, id: Uuid) -> Result<bool> {
        Ok(self.news.lock().unwrap().remove(&id).is_some())
    }

    async fn search_news(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<NewsItem>> {
        let needle = query.to_lowercase();
        let mut hits: Vec<_> = self
            .news
            .lock()
            .unwrap()
            .values()
            .filter(|n| {
                n.title.to_lowercase().contains(&needle)
                    || n.body.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        hits.truncate(limit as usize);
        Ok(hits)
    }
}

// Engagement

#[derive(Default)]
pub struct InMemoryEngagement {
    pub comments: Mutex<HashMap<Uuid, Comment>>,
    pub prayers: Mutex<Vec<PrayerRequest>>,
    pub contacts: Mutex<Vec<ContactMessage>>,
}

#[async_trait]
impl EngagementRepository for InMemoryEngagement {
    async fn list_comments(
        &self,
        media_id: Uuid,
        page: &PageQuery,
    ) -> Result<Page<Comment>> {
        let mut items: Vec<_> = self
            .comments
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.media_id == media_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(items, page))
    }

    async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>> {
        Ok(self.comments.lock().unwrap().get(&id).cloned())
    }

    async fn create_comment(&self, comment: &Comment) -> Result<()> {
        self.comments
            .lock()
            .unwrap()
            .insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool> {
        Ok(self.comments.lock().unwrap().remove(&id).is_some())
    }

    async fn create_prayer_request(
        &self,
        request: &PrayerRequest,
    ) -> Result<()> {
        self.prayers.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn list_prayer_requests(
        &self,
        page: &PageQuery,
    ) -> Result<Page<PrayerRequest>> {
        let mut items = self.prayers.lock().unwrap().clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(items, page))
    }

    async fn create_contact_message(
        &self,
        message: &ContactMessage,
    ) -> Result<()> {
        self.contacts.lock().unwrap().push(message.clone());
        Ok(())
    }
}

// Giving

#[derive(Default)]
pub struct InMemoryGiving {
    pub donations: Mutex<Vec<Donation>>,
}

#[async_trait]
impl GivingRepository for InMemoryGiving {
    async fn create(&self, donation: &Donation) -> Result<()> {
        self.donations.lock().unwrap().push(donation.clone());
        Ok(())
    }

    async fn list(&self, page: &PageQuery) -> Result<Page<Donation>> {
        let mut items = self.donations.lock().unwrap().clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(items, page))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        page: &PageQuery,
    ) -> Result<Page<Donation>> {
        let mut items: Vec<_> = self
            .donations
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user_id == Some(user_id))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(items, page))
    }
}

// Progress

const COMPLETION_THRESHOLD: f32 = 0.95;

#[derive(Default)]
pub struct InMemoryProgress {
    pub progress: Mutex<HashMap<(Uuid, Uuid), PlaybackProgress>>,
    pub completed: Mutex<Vec<(Uuid, Uuid)>>,
    pub saved: Mutex<HashMap<(Uuid, Uuid), DateTime<Utc>>>,
}

#[async_trait]
impl ProgressRepository for InMemoryProgress {
    async fn update_progress(
        &self,
        user_id: Uuid,
        request: &UpdateProgressRequest,
    ) -> Result<()> {
        let key = (user_id, request.media_id);
        let completed = request.duration > 0.0
            && request.position / request.duration > COMPLETION_THRESHOLD;
        if completed {
            self.progress.lock().unwrap().remove(&key);
            let mut done = self.completed.lock().unwrap();
            if !done.contains(&key) {
                done.push(key);
            }
        } else {
            self.progress.lock().unwrap().insert(
                key,
                PlaybackProgress {
                    media_id: request.media_id,
                    position: request.position,
                    duration: request.duration,
                    updated_at: Utc::now(),
                },
            );
        }
        Ok(())
    }

    async fn get_progress(
        &self,
        user_id: Uuid,
        media_id: Uuid,
    ) -> Result<Option<PlaybackProgress>> {
        Ok(self
            .progress
            .lock()
            .unwrap()
            .get(&(user_id, media_id))
            .cloned())
    }

    async fn continue_listening(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<PlaybackProgress>> {
        let mut items: Vec<_> = self
            .progress
            .lock()
            .unwrap()
            .iter()
            .filter(|((uid, _), _)| *uid == user_id)
            .map(|(_, p)| p.clone())
            .collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        items.truncate(limit as usize);
        Ok(items)
    }

    async fn clear_progress(
        &self,
        user_id: Uuid,
        media_id: Uuid,
    ) -> Result<()> {
        self.progress.lock().unwrap().remove(&(user_id, media_id));
        Ok(())
    }

    async fn save_item(&self, user_id: Uuid, media_id: Uuid) -> Result<()> {
        self.saved
            .lock()
            .unwrap()
            .entry((user_id, media_id))
            .or_insert_with(Utc::now);
        Ok(())
    }

    async fn unsave_item(
        &self,
        user_id: Uuid,
        media_id: Uuid,
    ) -> Result<bool> {
        Ok(self
            .saved
            .lock()
            .unwrap()
            .remove(&(user_id, media_id))
            .is_some())
    }

    async fn list_saved(&self, user_id: Uuid) -> Result<Vec<SavedItem>> {
        let mut items: Vec<_> = self
            .saved
            .lock()
            .unwrap()
            .iter()
            .filter(|((uid, _), _)| *uid == user_id)
            .map(|((_, media_id), saved_at)| SavedItem {
                media_id: *media_id,
                saved_at: *saved_at,
            })
            .collect();
        items.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(items)
    }
}

// Harness

pub struct TestApp {
    pub server: TestServer,
    pub media: Arc<InMemoryMedia>,
    pub users: Arc<InMemoryUsers>,
    pub catalog: Arc<InMemoryCatalog>,
    pub engagement: Arc<InMemoryEngagement>,
    pub giving: Arc<InMemoryGiving>,
    pub progress: Arc<InMemoryProgress>,
    _dirs: tempfile::TempDir,
}

impl TestApp {
    pub fn spawn() -> Self {
        let dirs = tempfile::tempdir().expect("tempdir");
        let ffmpeg_stub = write_ffmpeg_stub(dirs.path());
        let ConfigLoad { config, .. } = ConfigLoader::new()
            .without_env_file()
            .with_var("JWT_SECRET", "integration-test-secret-0123456789")
            .with_var("KOINONIA_DEV_MODE", "1")
            .with_var(
                "UPLOAD_DIR",
                dirs.path().join("uploads").display().to_string(),
            )
            .with_var(
                "RECORDING_DIR",
                dirs.path().join("recordings").display().to_string(),
            )
            .with_var("FFMPEG_PATH", ffmpeg_stub.display().to_string())
            .load()
            .expect("test config");
        config.ensure_directories().expect("test dirs");

        let media = Arc::new(InMemoryMedia::default());
        let users = Arc::new(InMemoryUsers::default());
        let catalog = Arc::new(InMemoryCatalog::default());
        let engagement = Arc::new(InMemoryEngagement::default());
        let giving = Arc::new(InMemoryGiving::default());
        let progress = Arc::new(InMemoryProgress::default());

        let store = Store {
            media: media.clone(),
            users: users.clone(),
            catalog: catalog.clone(),
            engagement: engagement.clone(),
            giving: giving.clone(),
            progress: progress.clone(),
        };

        let state = AppState::new(Arc::new(config), store);
        let server = TestServer::new(create_app(state)).expect("test server");

        Self {
            server,
            media,
            users,
            catalog,
            engagement,
            giving,
            progress,
            _dirs: dirs,
        }
    }

    /// Register a user through the API and return their access token.
    pub async fn register(&self, username: &str) -> String {
        let response = self
            .server
            .post("/api/v1/auth/register")
            .json(&json!({
                "username": username,
                "password": "a-strong-password",
                "display_name": username,
            }))
            .await;
        response.assert_status_ok();
        response.json::<serde_json::Value>()["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }

    /// Register a user, flip their admin bit, and log in again so the
    /// token maps to an admin account.
    pub async fn register_admin(&self, username: &str) -> String {
        self.register(username).await;
        {
            let mut users = self.users.users.lock().unwrap();
            let user = users
                .values_mut()
                .find(|u| u.username == username)
                .expect("registered user");
            user.is_admin = true;
        }
        self.login(username).await
    }

    pub async fn login(&self, username: &str) -> String {
        let response = self
            .server
            .post("/api/v1/auth/login")
            .json(&json!({
                "username": username,
                "password": "a-strong-password",
            }))
            .await;
        response.assert_status_ok();
        response.json::<serde_json::Value>()["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }

    /// Seed a published sermon directly into the store.
    pub async fn seed_sermon(&self, title: &str) -> MediaRecord {
        let record = MediaRecord {
            id: Uuid::new_v4(),
            kind: MediaKind::Sermon,
            title: title.to_string(),
            speaker: Some("Pastor Amos".to_string()),
            description: Some("Sunday service".to_string()),
            thumbnail_url: None,
            video_url: Some("https://cdn.example/sermon.mp4".to_string()),
            audio_url: None,
            stream_url: None,
            duration_label: Some("45 min".to_string()),
            published_at: Utc::now(),
            view_count: 0,
            is_live: false,
        };
        self.media.create(&record).await.unwrap();
        record
    }

    pub async fn seed_podcast(&self, title: &str) -> MediaRecord {
        let record = MediaRecord {
            id: Uuid::new_v4(),
            kind: MediaKind::Podcast,
            title: title.to_string(),
            speaker: None,
            description: None,
            thumbnail_url: None,
            video_url: None,
            audio_url: Some("https://cdn.example/episode.mp3".to_string()),
            stream_url: None,
            duration_label: Some("30 min".to_string()),
            published_at: Utc::now(),
            view_count: 0,
            is_live: false,
        };
        self.media.create(&record).await.unwrap();
        record
    }
}
