//! REST envelope and pagination types shared between server and clients.

use serde::{Deserialize, Serialize};

use crate::catalog::{Event, NewsItem};
use crate::media::MediaRecord;

/// Standard API envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: Some(error),
            message: None,
        }
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }
}

/// Query-string pagination (`?page=2&limit=50`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

pub const MAX_PAGE_LIMIT: u32 = 100;

impl PageQuery {
    /// Clamped page number, never zero.
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Clamped page size in `[1, MAX_PAGE_LIMIT]`.
    pub fn limit(&self) -> u32 {
        self.limit.clamp(1, MAX_PAGE_LIMIT)
    }

    /// Row offset for the clamped page/limit pair.
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit())
    }
}

/// One page of results plus the paging cursor that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, query: &PageQuery, total: u64) -> Self {
        Self {
            items,
            page: query.page(),
            limit: query.limit(),
            total,
        }
    }
}

/// Cross-collection search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub sermons: Vec<MediaRecord>,
    pub podcasts: Vec<MediaRecord>,
    pub events: Vec<Event>,
    pub news: Vec<NewsItem>,
}
