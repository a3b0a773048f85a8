//! Database connection and migration helpers.

use anyhow::{Context, Result, anyhow};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use url::Url;

pub fn validate_database_url(base: &str) -> Result<()> {
    let url = Url::parse(base).context("invalid PostgreSQL URL")?;
    if url.scheme() != "postgres" && url.scheme() != "postgresql" {
        return Err(anyhow!(
            "database URL must use the postgres:// scheme, got `{}`",
            url.scheme()
        ));
    }
    if url.path().trim_start_matches('/').is_empty() {
        return Err(anyhow!("database URL must include a database name"));
    }
    Ok(())
}

pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    validate_database_url(database_url)?;
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("failed to connect to PostgreSQL")
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("database migration failed")
}
