use async_trait::async_trait;
use koinonia_model::{
    MediaRecord, Page, PageQuery, UpdateMediaRecord,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::Result;
use crate::store::ports::{MediaFilter, MediaRepository};

const MEDIA_COLUMNS: &str = "id, kind, title, speaker, description, \
     thumbnail_url, video_url, audio_url, stream_url, duration_label, \
     published_at, view_count, is_live";

#[derive(Clone, Debug)]
pub struct PostgresMediaRepository {
    pool: PgPool,
}

impl PostgresMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PostgresMediaRepository {
    async fn list(
        &self,
        filter: MediaFilter,
        page: &PageQuery,
    ) -> Result<Page<MediaRecord>> {
        // Filter clauses are static SQL; only values are bound.
        let mut clauses: Vec<&str> = Vec::new();
        if filter.kind.is_some() {
            clauses.push("kind = $1");
        }
        if filter.live_only {
            clauses.push("is_live");
        }
        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        let count_sql =
            format!("SELECT COUNT(*) FROM media_items {where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(kind) = filter.kind {
            count_query = count_query.bind(kind);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let list_sql = format!(
            "SELECT {MEDIA_COLUMNS} FROM media_items {where_clause} \
             ORDER BY published_at DESC LIMIT {} OFFSET {}",
            page.limit(),
            page.offset()
        );
        let mut list_query = sqlx::query_as::<_, MediaRecord>(&list_sql);
        if let Some(kind) = filter.kind {
            list_query = list_query.bind(kind);
        }
        let items = list_query.fetch_all(&self.pool).await?;

        Ok(Page::new(items, page, total.max(0) as u64))
    }

    async fn get(&self, id: Uuid) -> Result<Option<MediaRecord>> {
        let sql =
            format!("SELECT {MEDIA_COLUMNS} FROM media_items WHERE id = $1");
        let record = sqlx::query_as::<_, MediaRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn get_and_increment_views(
        &self,
        id: Uuid,
    ) -> Result<Option<MediaRecord>> {
        let sql = format!(
            "UPDATE media_items SET view_count = view_count + 1 \
             WHERE id = $1 RETURNING {MEDIA_COLUMNS}"
        );
        let record = sqlx::query_as::<_, MediaRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn create(&self, record: &MediaRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO media_items (id, kind, title, speaker, description, \
             thumbnail_url, video_url, audio_url, stream_url, duration_label, \
             published_at, view_count, is_live) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(record.id)
        .bind(record.kind)
        .bind(&record.title)
        .bind(&record.speaker)
        .bind(&record.description)
        .bind(&record.thumbnail_url)
        .bind(&record.video_url)
        .bind(&record.audio_url)
        .bind(&record.stream_url)
        .bind(&record.duration_label)
        .bind(record.published_at)
        .bind(record.view_count)
        .bind(record.is_live)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        update: &UpdateMediaRecord,
    ) -> Result<Option<MediaRecord>> {
        let sql = format!(
            "UPDATE media_items SET \
             title = COALESCE($2, title), \
             speaker = COALESCE($3, speaker), \
             description = COALESCE($4, description), \
             thumbnail_url = COALESCE($5, thumbnail_url), \
             video_url = COALESCE($6, video_url), \
             audio_url = COALESCE($7, audio_url), \
             stream_url = COALESCE($8, stream_url), \
             duration_label = COALESCE($9, duration_label), \
             is_live = COALESCE($10, is_live) \
             WHERE id = $1 RETURNING {MEDIA_COLUMNS}"
        );
        let record = sqlx::query_as::<_, MediaRecord>(&sql)
            .bind(id)
            .bind(&update.title)
            .bind(&update.speaker)
            .bind(&update.description)
            .bind(&update.thumbnail_url)
            .bind(&update.video_url)
            .bind(&update.audio_url)
            .bind(&update.stream_url)
            .bind(&update.duration_label)
            .bind(update.is_live)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM media_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_live(
        &self,
        id: Uuid,
        is_live: bool,
        video_url: Option<String>,
    ) -> Result<Option<MediaRecord>> {
        let sql = format!(
            "UPDATE media_items SET is_live = $2, \
             video_url = COALESCE($3, video_url) \
             WHERE id = $1 RETURNING {MEDIA_COLUMNS}"
        );
        let record = sqlx::query_as::<_, MediaRecord>(&sql)
            .bind(id)
            .bind(is_live)
            .bind(video_url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<MediaRecord>> {
        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            "SELECT {MEDIA_COLUMNS} FROM media_items \
             WHERE title ILIKE $1 OR speaker ILIKE $1 OR description ILIKE $1 \
             ORDER BY published_at DESC LIMIT {limit}"
        );
        let records = sqlx::query_as::<_, MediaRecord>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn count_all(&self) -> Result<u64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM media_items")
                .fetch_one(&self.pool)
                .await?;
        Ok(count.max(0) as u64)
    }
}

/// Escape LIKE metacharacters so user input matches literally.
pub(crate) fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
