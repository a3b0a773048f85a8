use async_trait::async_trait;
use koinonia_model::{Comment, ContactMessage, Page, PageQuery, PrayerRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::Result;
use crate::store::ports::EngagementRepository;

#[derive(Clone, Debug)]
pub struct PostgresEngagementRepository {
    pool: PgPool,
}

impl PostgresEngagementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngagementRepository for PostgresEngagementRepository {
    async fn list_comments(
        &self,
        media_id: Uuid,
        page: &PageQuery,
    ) -> Result<Page<Comment>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE media_id = $1",
        )
        .bind(media_id)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT id, media_id, user_id, author_name, body, created_at \
             FROM comments WHERE media_id = $1 \
             ORDER BY created_at DESC LIMIT {} OFFSET {}",
            page.limit(),
            page.offset()
        );
        let items = sqlx::query_as::<_, Comment>(&sql)
            .bind(media_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(items, page, total.max(0) as u64))
    }

    async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, media_id, user_id, author_name, body, created_at \
             FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn create_comment(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, media_id, user_id, author_name, \
             body, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(comment.id)
        .bind(comment.media_id)
        .bind(comment.user_id)
        .bind(&comment.author_name)
        .bind(&comment.body)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_prayer_request(
        &self,
        request: &PrayerRequest,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO prayer_requests (id, user_id, name, body, \
             is_private, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(request.id)
        .bind(request.user_id)
        .bind(&request.name)
        .bind(&request.body)
        .bind(request.is_private)
        .bind(request.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_prayer_requests(
        &self,
        page: &PageQuery,
    ) -> Result<Page<PrayerRequest>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM prayer_requests",
        )
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT id, user_id, name, body, is_private, created_at \
             FROM prayer_requests \
             ORDER BY created_at DESC LIMIT {} OFFSET {}",
            page.limit(),
            page.offset()
        );
        let items = sqlx::query_as::<_, PrayerRequest>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(items, page, total.max(0) as u64))
    }

    async fn create_contact_message(
        &self,
        message: &ContactMessage,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO contact_messages (id, name, email, subject, body, \
             created_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.body)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
