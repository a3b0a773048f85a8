//! Storage layer: repository ports and their Postgres implementations.

pub mod ports;
pub mod postgres;

use std::sync::Arc;

pub use ports::{
    CatalogRepository, EngagementRepository, GivingRepository,
    MediaRepository, ProgressRepository, UserRepository,
};

/// Errors surfaced by repository implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => {
                StoreError::NotFound("row not found".to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Bundle of repository handles threaded through the application state.
#[derive(Clone)]
pub struct Store {
    pub media: Arc<dyn MediaRepository>,
    pub users: Arc<dyn UserRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub engagement: Arc<dyn EngagementRepository>,
    pub giving: Arc<dyn GivingRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Wire every repository against one Postgres pool.
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            media: Arc::new(postgres::PostgresMediaRepository::new(
                pool.clone(),
            )),
            users: Arc::new(postgres::PostgresUserRepository::new(
                pool.clone(),
            )),
            catalog: Arc::new(postgres::PostgresCatalogRepository::new(
                pool.clone(),
            )),
            engagement: Arc::new(postgres::PostgresEngagementRepository::new(
                pool.clone(),
            )),
            giving: Arc::new(postgres::PostgresGivingRepository::new(
                pool.clone(),
            )),
            progress: Arc::new(postgres::PostgresProgressRepository::new(
                pool,
            )),
        }
    }
}
