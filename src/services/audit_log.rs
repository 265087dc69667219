//! Best-effort audit logging to the app_logs table.
//!
//! Contract: `record` never blocks and never fails the caller. Entries are
//! queued on a bounded channel; a full queue or a failed insert drops the
//! entry with a `tracing::warn!`. Callers that need guaranteed delivery do
//! not belong here.

use sqlx::PgPool;
use tokio::sync::mpsc;
use tracing::warn;

use crate::database::models::AppLog;

pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

#[derive(Clone)]
pub struct AuditLogger {
    tx: mpsc::Sender<AppLog>,
}

impl AuditLogger {
    /// Create a logger and the receiving end of its queue. Pair with
    /// [`spawn_writer`] in production; tests can inspect the receiver
    /// directly.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<AppLog>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Queue an entry. Drops it when the queue is full.
    pub fn record(&self, entry: AppLog) {
        if let Err(e) = self.tx.try_send(entry) {
            warn!("audit log queue full, entry dropped: {}", e);
        }
    }
}

/// Drain the queue into app_logs until every sender is gone. Insert failures
/// drop the entry.
pub fn spawn_writer(pool: PgPool, mut rx: mpsc::Receiver<AppLog>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(entry) = rx.recv().await {
            if let Err(e) = insert_entry(&pool, &entry).await {
                warn!("audit log write failed, entry dropped: {}", e);
            }
        }
    })
}

async fn insert_entry(pool: &PgPool, entry: &AppLog) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO app_logs (timestamp, level, message, exception, source) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(entry.timestamp)
    .bind(&entry.level)
    .bind(&entry.message)
    .bind(&entry.exception)
    .bind(&entry.source)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn record_queues_entries_in_order() {
        let (logger, mut rx) = AuditLogger::channel(8);

        logger.record(AppLog::new("Information", "first", "tests"));
        logger.record(AppLog::new("Warning", "second", "tests"));

        assert_eq!(rx.recv().await.unwrap().message, "first");
        assert_eq!(rx.recv().await.unwrap().message, "second");
    }

    #[tokio::test]
    async fn full_queue_drops_instead_of_blocking() {
        let (logger, mut rx) = AuditLogger::channel(1);

        logger.record(AppLog::new("Information", "kept", "tests"));
        logger.record(AppLog::new("Information", "dropped", "tests"));

        assert_eq!(rx.recv().await.unwrap().message, "kept");
        assert!(rx.try_recv().is_err(), "overflow entry should have been dropped");
    }

    #[tokio::test]
    async fn exception_detail_travels_with_the_entry() {
        let (logger, mut rx) = AuditLogger::channel(1);
        logger.record(
            AppLog::new("Error", "delete failed", "categories").with_exception("fk violation"),
        );

        let entry = rx.recv().await.unwrap();
        assert_eq!(entry.exception.as_deref(), Some("fk violation"));
    }
}
