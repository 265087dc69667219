use axum::extract::Extension;
use sqlx::PgPool;

use crate::database::models::LogEntry;
use crate::database::repositories::LogRepository;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

// Empty allow-list: only Admin passes the gate.
const ROLES: &[&str] = &[];

const MAX_LOG_RESULTS: i64 = 1000;

/// GET /api/logs - most recent audit entries, Admin only.
pub async fn list(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<LogEntry>> {
    auth_user.require_role(ROLES)?;

    let repository = LogRepository::new(pool);
    Ok(ApiResponse::success(
        repository.get_recent(MAX_LOG_RESULTS).await?,
    ))
}
