use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config;

/// Errors surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    fn pg_code(&self) -> Option<String> {
        match self {
            DatabaseError::Sqlx(sqlx::Error::Database(db_err)) => {
                db_err.code().map(|c| c.to_string())
            }
            _ => None,
        }
    }

    /// Duplicate key on a unique index (Postgres 23505). The application-level
    /// uniqueness pre-check loses the TOCTOU race sometimes; the index is the
    /// actual safety net and surfaces here.
    pub fn is_unique_violation(&self) -> bool {
        self.pg_code().as_deref() == Some("23505")
    }

    /// Restrict-delete rejected by a foreign key (Postgres 23503).
    pub fn is_foreign_key_violation(&self) -> bool {
        self.pg_code().as_deref() == Some("23503")
    }
}

/// Connection handling for the catalog database. One shared pool, created at
/// startup from DATABASE_URL and handed to handlers via an axum extension.
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect() -> Result<PgPool, DatabaseError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let db_config = &config::config().database;
        let pool = PgPoolOptions::new()
            .max_connections(db_config.max_connections)
            .acquire_timeout(Duration::from_secs(db_config.connection_timeout))
            .connect(&url)
            .await?;

        info!("Connected to catalog database");
        Ok(pool)
    }

    /// Apply pending migrations from the crate's migrations/ directory.
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!().run(pool).await?;
        Ok(())
    }

    /// Ping the database for the /health endpoint.
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
