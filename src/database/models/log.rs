use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A stored audit-log row as read back for the admin logs endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
    pub exception: Option<String>,
    pub source: String,
}

/// One audit-log row queued for the best-effort writer (see
/// `services::audit_log`).
#[derive(Debug, Clone)]
pub struct AppLog {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
    pub exception: Option<String>,
    pub source: String,
}

impl AppLog {
    pub fn new(level: impl Into<String>, message: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level: level.into(),
            message: message.into(),
            exception: None,
            source: source.into(),
        }
    }

    pub fn with_exception(mut self, exception: impl Into<String>) -> Self {
        self.exception = Some(exception.into());
        self
    }
}
