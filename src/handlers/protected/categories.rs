use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{AppLog, Category, CategoryLookup};
use crate::database::repositories::CategoryRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::search::{PagedResult, PageParams};
use crate::services::AuditLogger;

use super::conflict::{check_no_referencing_products, check_unique_name};
use super::validation::{clean_description, clean_name, validate_category};
use super::PagedQuery;

const ROLES: &[&str] = &["Category"];
const LOOKUP_ROLES: &[&str] = &["Category", "Product"];
const DEFAULT_LOOKUP_RESULTS: i64 = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupQuery {
    #[serde(default)]
    pub search_term: String,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
}

fn default_max_results() -> i64 {
    DEFAULT_LOOKUP_RESULTS
}

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: Option<String>,
}

/// GET /api/categories - paged, optionally filtered list
pub async fn list(
    Query(query): Query<PagedQuery>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<PagedResult<Category>> {
    auth_user.require_role(ROLES)?;

    let params = PageParams::clamped(query.page, query.page_size);
    let repository = CategoryRepository::new(pool);
    let (items, total_count) = repository
        .get_paged(params, query.search_term.as_deref())
        .await?;

    Ok(ApiResponse::success(PagedResult::new(items, params, total_count)))
}

/// GET /api/categories/search - bounded lookup for type-ahead widgets
pub async fn search(
    Query(query): Query<LookupQuery>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<CategoryLookup>> {
    auth_user.require_role(LOOKUP_ROLES)?;

    let repository = CategoryRepository::new(pool);
    let matches = repository
        .search_by_term(&query.search_term, query.max_results)
        .await?;

    Ok(ApiResponse::success(matches))
}

/// GET /api/categories/:id
pub async fn get(
    Path(id): Path<Uuid>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Category> {
    auth_user.require_role(ROLES)?;

    let repository = CategoryRepository::new(pool);
    Ok(ApiResponse::success(repository.get_by_id(id).await?))
}

/// POST /api/categories
pub async fn create(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Extension(audit): Extension<AuditLogger>,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<Category> {
    auth_user.require_role(ROLES)?;
    validate_category(&payload.name, payload.description.as_deref())?;

    let name = clean_name(&payload.name);
    let repository = CategoryRepository::new(pool);

    // Uniqueness gate; the lower(name) index backstops the race
    check_unique_name(
        repository.find_by_name(&name).await?.as_ref(),
        None,
        "category",
        &name,
    )?;

    let created = repository
        .insert(&name, clean_description(payload.description.as_deref()).as_deref())
        .await?;

    audit.record(AppLog::new(
        "Information",
        format!("Category '{}' created by {}", created.name, auth_user.email),
        "categories",
    ));

    Ok(ApiResponse::created(created))
}

/// PUT /api/categories/:id
pub async fn update(
    Path(id): Path<Uuid>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Extension(audit): Extension<AuditLogger>,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<Category> {
    auth_user.require_role(ROLES)?;
    validate_category(&payload.name, payload.description.as_deref())?;

    let name = clean_name(&payload.name);
    let repository = CategoryRepository::new(pool);
    repository.get_by_id(id).await?;

    check_unique_name(
        repository.find_by_name(&name).await?.as_ref(),
        Some(id),
        "category",
        &name,
    )?;

    let updated = repository
        .update(id, &name, clean_description(payload.description.as_deref()).as_deref())
        .await?;

    audit.record(AppLog::new(
        "Information",
        format!("Category '{}' updated by {}", updated.name, auth_user.email),
        "categories",
    ));

    Ok(ApiResponse::success(updated))
}

/// DELETE /api/categories/:id - restrict-delete while products reference it
pub async fn delete(
    Path(id): Path<Uuid>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Extension(audit): Extension<AuditLogger>,
) -> ApiResult<()> {
    auth_user.require_role(ROLES)?;

    let repository = CategoryRepository::new(pool);
    if !repository.exists(id).await? {
        return Err(ApiError::not_found(format!(
            "Category with id '{}' was not found",
            id
        )));
    }

    check_no_referencing_products(repository.referencing_product_count(id).await?)?;

    repository.delete(id).await?;

    audit.record(AppLog::new(
        "Information",
        format!("Category '{}' deleted by {}", id, auth_user.email),
        "categories",
    ));

    Ok(ApiResponse::<()>::no_content())
}
