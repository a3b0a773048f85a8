use async_trait::async_trait;
use koinonia_model::{Devotion, Event, Ministry, NewsItem, Page, PageQuery};
use sqlx::PgPool;
use uuid::Uuid;

use super::media::escape_like;
use crate::store::Result;
use crate::store::ports::CatalogRepository;

#[derive(Clone, Debug)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, table: &str) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let total = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(total.max(0) as u64)
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn list_events(&self, page: &PageQuery) -> Result<Page<Event>> {
        let total = self.count("events").await?;
        let sql = format!(
            "SELECT id, title, description, location, starts_at, ends_at, \
             thumbnail_url FROM events \
             ORDER BY starts_at ASC LIMIT {} OFFSET {}",
            page.limit(),
            page.offset()
        );
        let items = sqlx::query_as::<_, Event>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(items, page, total))
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, location, starts_at, ends_at, \
             thumbnail_url FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(event)
    }

    async fn create_event(&self, event: &Event) -> Result<()> {
        sqlx::query(
            "INSERT INTO events (id, title, description, location, \
             starts_at, ends_at, thumbnail_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(&event.thumbnail_url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_event(&self, event: &Event) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE events SET title = $2, description = $3, location = $4, \
             starts_at = $5, ends_at = $6, thumbnail_url = $7 WHERE id = $1",
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(&event.thumbnail_url)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_events(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Event>> {
        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            "SELECT id, title, description, location, starts_at, ends_at, \
             thumbnail_url FROM events \
             WHERE title ILIKE $1 OR description ILIKE $1 \
             ORDER BY starts_at ASC LIMIT {limit}"
        );
        let events = sqlx::query_as::<_, Event>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn list_devotions(
        &self,
        page: &PageQuery,
    ) -> Result<Page<Devotion>> {
        let total = self.count("devotions").await?;
        let sql = format!(
            "SELECT id, title, body, scripture_reference, author, \
             published_at FROM devotions \
             ORDER BY published_at DESC LIMIT {} OFFSET {}",
            page.limit(),
            page.offset()
        );
        let items = sqlx::query_as::<_, Devotion>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(items, page, total))
    }

    async fn get_devotion(&self, id: Uuid) -> Result<Option<Devotion>> {
        let devotion = sqlx::query_as::<_, Devotion>(
            "SELECT id, title, body, scripture_reference, author, \
             published_at FROM devotions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(devotion)
    }

    async fn create_devotion(&self, devotion: &Devotion) -> Result<()> {
        sqlx::query(
            "INSERT INTO devotions (id, title, body, scripture_reference, \
             author, published_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(devotion.id)
        .bind(&devotion.title)
        .bind(&devotion.body)
        .bind(&devotion.scripture_reference)
        .bind(&devotion.author)
        .bind(devotion.published_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_devotion(&self, devotion: &Devotion) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE devotions SET title = $2, body = $3, \
             scripture_reference = $4, author = $5, published_at = $6 \
             WHERE id = $1",
        )
        .bind(devotion.id)
        .bind(&devotion.title)
        .bind(&devotion.body)
        .bind(&devotion.scripture_reference)
        .bind(&devotion.author)
        .bind(devotion.published_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_devotion(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM devotions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_ministries(
        &self,
        page: &PageQuery,
    ) -> Result<Page<Ministry>> {
        let total = self.count("ministries").await?;
        let sql = format!(
            "SELECT id, name, description, leader, contact_email, \
             thumbnail_url FROM ministries \
             ORDER BY name ASC LIMIT {} OFFSET {}",
            page.limit(),
            page.offset()
        );
        let items = sqlx::query_as::<_, Ministry>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(items, page, total))
    }

    async fn get_ministry(&self, id: Uuid) -> Result<Option<Ministry>> {
        let ministry = sqlx::query_as::<_, Ministry>(
            "SELECT id, name, description, leader, contact_email, \
             thumbnail_url FROM ministries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ministry)
    }

    async fn create_ministry(&self, ministry: &Ministry) -> Result<()> {
        sqlx::query(
            "INSERT INTO ministries (id, name, description, leader, \
             contact_email, thumbnail_url) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(ministry.id)
        .bind(&ministry.name)
        .bind(&ministry.description)
        .bind(&ministry.leader)
        .bind(&ministry.contact_email)
        .bind(&ministry.thumbnail_url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_ministry(&self, ministry: &Ministry) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE ministries SET name = $2, description = $3, leader = $4, \
             contact_email = $5, thumbnail_url = $6 WHERE id = $1",
        )
        .bind(ministry.id)
        .bind(&ministry.name)
        .bind(&ministry.description)
        .bind(&ministry.leader)
        .bind(&ministry.contact_email)
        .bind(&ministry.thumbnail_url)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_ministry(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ministries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_news(&self, page: &PageQuery) -> Result<Page<NewsItem>> {
        let total = self.count("news_items").await?;
        let sql = format!(
            "SELECT id, title, body, thumbnail_url, published_at \
             FROM news_items \
             ORDER BY published_at DESC LIMIT {} OFFSET {}",
            page.limit(),
            page.offset()
        );
        let items = sqlx::query_as::<_, NewsItem>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(items, page, total))
    }

    async fn get_news(&self, id: Uuid) -> Result<Option<NewsItem>> {
        let item = sqlx::query_as::<_, NewsItem>(
            "SELECT id, title, body, thumbnail_url, published_at \
             FROM news_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn create_news(&self, item: &NewsItem) -> Result<()> {
        sqlx::query(
            "INSERT INTO news_items (id, title, body, thumbnail_url, \
             published_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.body)
        .bind(&item.thumbnail_url)
        .bind(item.published_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_news(&self, item: &NewsItem) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE news_items SET title = $2, body = $3, \
             thumbnail_url = $4, published_at = $5 WHERE id = $1",
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.body)
        .bind(&item.thumbnail_url)
        .bind(item.published_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_news(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM news_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_news(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<NewsItem>> {
        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            "SELECT id, title, body, thumbnail_url, published_at \
             FROM news_items WHERE title ILIKE $1 OR body ILIKE $1 \
             ORDER BY published_at DESC LIMIT {limit}"
        );
        let items = sqlx::query_as::<_, NewsItem>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }
}
