use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::LogEntry;

pub struct LogRepository {
    pool: PgPool,
}

impl LogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recent entries first. The id tie-break keeps ordering stable for
    /// rows written in the same instant.
    pub async fn get_recent(&self, limit: i64) -> Result<Vec<LogEntry>, DatabaseError> {
        let rows = sqlx::query_as::<_, LogEntry>(
            "SELECT id, timestamp, level, message, exception, source FROM app_logs \
             ORDER BY timestamp DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
