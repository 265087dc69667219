use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{AppLog, Product};
use crate::database::repositories::{CategoryRepository, ProductRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::search::{PagedResult, PageParams};
use crate::services::AuditLogger;

use super::conflict::check_unique_name;
use super::validation::{clean_description, clean_name, validate_product};
use super::PagedQuery;

const ROLES: &[&str] = &["Product"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
}

/// GET /api/products - paged, optionally filtered list. The search term also
/// matches the joined category name.
pub async fn list(
    Query(query): Query<PagedQuery>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<PagedResult<Product>> {
    auth_user.require_role(ROLES)?;

    let params = PageParams::clamped(query.page, query.page_size);
    let repository = ProductRepository::new(pool);
    let (items, total_count) = repository
        .get_paged(params, query.search_term.as_deref())
        .await?;

    Ok(ApiResponse::success(PagedResult::new(items, params, total_count)))
}

/// GET /api/products/:id
pub async fn get(
    Path(id): Path<Uuid>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Product> {
    auth_user.require_role(ROLES)?;

    let repository = ProductRepository::new(pool);
    Ok(ApiResponse::success(repository.get_by_id(id).await?))
}

/// POST /api/products
pub async fn create(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Extension(audit): Extension<AuditLogger>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<Product> {
    auth_user.require_role(ROLES)?;
    validate_product(
        &payload.name,
        payload.description.as_deref(),
        payload.price,
        payload.stock,
        payload.category_id,
    )?;

    let categories = CategoryRepository::new(pool.clone());
    categories.get_by_id(payload.category_id).await?;

    let name = clean_name(&payload.name);
    let repository = ProductRepository::new(pool);

    check_unique_name(
        repository.find_by_name(&name).await?.as_ref(),
        None,
        "product",
        &name,
    )?;

    let created = repository
        .insert(
            &name,
            clean_description(payload.description.as_deref()).as_deref(),
            payload.price,
            payload.stock,
            payload.category_id,
        )
        .await?;

    audit.record(AppLog::new(
        "Information",
        format!("Product '{}' created by {}", created.name, auth_user.email),
        "products",
    ));

    Ok(ApiResponse::created(created))
}

/// PUT /api/products/:id
pub async fn update(
    Path(id): Path<Uuid>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Extension(audit): Extension<AuditLogger>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<Product> {
    auth_user.require_role(ROLES)?;
    validate_product(
        &payload.name,
        payload.description.as_deref(),
        payload.price,
        payload.stock,
        payload.category_id,
    )?;

    let repository = ProductRepository::new(pool.clone());
    repository.get_by_id(id).await?;

    let categories = CategoryRepository::new(pool);
    categories.get_by_id(payload.category_id).await?;

    let name = clean_name(&payload.name);
    check_unique_name(
        repository.find_by_name(&name).await?.as_ref(),
        Some(id),
        "product",
        &name,
    )?;

    let updated = repository
        .update(
            id,
            &name,
            clean_description(payload.description.as_deref()).as_deref(),
            payload.price,
            payload.stock,
            payload.category_id,
        )
        .await?;

    audit.record(AppLog::new(
        "Information",
        format!("Product '{}' updated by {}", updated.name, auth_user.email),
        "products",
    ));

    Ok(ApiResponse::success(updated))
}

/// DELETE /api/products/:id
pub async fn delete(
    Path(id): Path<Uuid>,
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
    Extension(audit): Extension<AuditLogger>,
) -> ApiResult<()> {
    auth_user.require_role(ROLES)?;

    let repository = ProductRepository::new(pool);
    if !repository.exists(id).await? {
        return Err(ApiError::not_found(format!(
            "Product with id '{}' was not found",
            id
        )));
    }

    repository.delete(id).await?;

    audit.record(AppLog::new(
        "Information",
        format!("Product '{}' deleted by {}", id, auth_user.email),
        "products",
    ));

    Ok(ApiResponse::<()>::no_content())
}
