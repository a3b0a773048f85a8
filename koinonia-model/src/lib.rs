//! Core data model definitions shared across Koinonia crates.

pub mod api;
pub mod catalog;
pub mod engagement;
pub mod error;
pub mod giving;
pub mod media;
pub mod playback;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use api::{ApiResponse, Page, PageQuery, SearchResults};
pub use catalog::{
    Devotion, Event, Ministry, NewDevotion, NewEvent, NewMinistry,
    NewNewsItem, NewsItem,
};
pub use engagement::{
    Comment, ContactMessage, NewComment, NewContactMessage, NewPrayerRequest,
    PrayerRequest,
};
pub use error::ValidationError;
pub use giving::{Donation, NewDonation};
pub use media::{MediaKind, MediaRecord, NewMediaRecord, UpdateMediaRecord};
pub use playback::{PlaybackProgress, SavedItem, UpdateProgressRequest};
pub use user::{
    AuthError, AuthToken, Claims, LoginRequest, RegisterRequest, User,
};
