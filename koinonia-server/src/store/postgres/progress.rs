use async_trait::async_trait;
use koinonia_model::{PlaybackProgress, SavedItem, UpdateProgressRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::Result;
use crate::store::ports::ProgressRepository;

/// Progress past this ratio counts as a completed listen.
const COMPLETION_THRESHOLD: f32 = 0.95;

#[derive(Clone, Debug)]
pub struct PostgresProgressRepository {
    pool: PgPool,
}

impl PostgresProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressRepository for PostgresProgressRepository {
    async fn update_progress(
        &self,
        user_id: Uuid,
        request: &UpdateProgressRequest,
    ) -> Result<()> {
        let completed = request.duration > 0.0
            && request.position / request.duration > COMPLETION_THRESHOLD;

        let mut tx = self.pool.begin().await?;

        if completed {
            sqlx::query(
                "DELETE FROM playback_progress \
                 WHERE user_id = $1 AND media_id = $2",
            )
            .bind(user_id)
            .bind(request.media_id)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                "INSERT INTO completed_media (user_id, media_id) \
                 VALUES ($1, $2) \
                 ON CONFLICT (user_id, media_id) DO NOTHING",
            )
            .bind(user_id)
            .bind(request.media_id)
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query(
                "INSERT INTO playback_progress \
                 (user_id, media_id, position, duration, updated_at) \
                 VALUES ($1, $2, $3, $4, NOW()) \
                 ON CONFLICT (user_id, media_id) DO UPDATE SET \
                 position = EXCLUDED.position, \
                 duration = EXCLUDED.duration, \
                 updated_at = NOW()",
            )
            .bind(user_id)
            .bind(request.media_id)
            .bind(request.position)
            .bind(request.duration)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_progress(
        &self,
        user_id: Uuid,
        media_id: Uuid,
    ) -> Result<Option<PlaybackProgress>> {
        let progress = sqlx::query_as::<_, PlaybackProgress>(
            "SELECT media_id, position, duration, updated_at \
             FROM playback_progress \
             WHERE user_id = $1 AND media_id = $2",
        )
        .bind(user_id)
        .bind(media_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(progress)
    }

    async fn continue_listening(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<PlaybackProgress>> {
        let sql = format!(
            "SELECT media_id, position, duration, updated_at \
             FROM playback_progress WHERE user_id = $1 \
             ORDER BY updated_at DESC LIMIT {limit}"
        );
        let items = sqlx::query_as::<_, PlaybackProgress>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn clear_progress(
        &self,
        user_id: Uuid,
        media_id: Uuid,
    ) -> Result<()> {
        sqlx::query(
            "DELETE FROM playback_progress \
             WHERE user_id = $1 AND media_id = $2",
        )
        .bind(user_id)
        .bind(media_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save_item(&self, user_id: Uuid, media_id: Uuid) -> Result<()> {
        sqlx::query(
            "INSERT INTO saved_items (user_id, media_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, media_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(media_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn unsave_item(
        &self,
        user_id: Uuid,
        media_id: Uuid,
    ) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM saved_items WHERE user_id = $1 AND media_id = $2",
        )
        .bind(user_id)
        .bind(media_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_saved(&self, user_id: Uuid) -> Result<Vec<SavedItem>> {
        let items = sqlx::query_as::<_, SavedItem>(
            "SELECT media_id, saved_at FROM saved_items \
             WHERE user_id = $1 ORDER BY saved_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
