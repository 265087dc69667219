use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, CategoryLookup};
use crate::search::{self, normalize_for_search, PageParams};

const SELECT_CATEGORY: &str = "SELECT id, name, description, created_date FROM categories";

pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DatabaseError> {
        let row = sqlx::query_as::<_, Category>(&format!("{} WHERE id = $1", SELECT_CATEGORY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Category, DatabaseError> {
        self.find_by_id(id).await?.ok_or_else(|| {
            DatabaseError::NotFound(format!("Category with id '{}' was not found", id))
        })
    }

    /// Exact-name lookup for the uniqueness pre-check, case-insensitive per
    /// the lower(name) index collation.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DatabaseError> {
        let row = sqlx::query_as::<_, Category>(&format!(
            "{} WHERE lower(name) = lower($1)",
            SELECT_CATEGORY
        ))
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let found: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// Number of products referencing this category; non-zero blocks delete.
    pub async fn referencing_product_count(&self, id: Uuid) -> Result<i64, DatabaseError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE category_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// One page of categories plus the pre-paging total count.
    ///
    /// Blank term: count and slice are pushed to the store. Non-blank term:
    /// accent-insensitive matching the store cannot do natively, so the full
    /// table is loaded and filtered in process.
    pub async fn get_paged(
        &self,
        params: PageParams,
        search_term: Option<&str>,
    ) -> Result<(Vec<Category>, i64), DatabaseError> {
        let term = search_term.map(str::trim).unwrap_or_default();

        if term.is_empty() {
            let (total_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
                .fetch_one(&self.pool)
                .await?;

            let items = sqlx::query_as::<_, Category>(&format!(
                "{} ORDER BY lower(name), id LIMIT $1 OFFSET $2",
                SELECT_CATEGORY
            ))
            .bind(params.page_size)
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await?;

            return Ok((items, total_count));
        }

        let all = sqlx::query_as::<_, Category>(SELECT_CATEGORY)
            .fetch_all(&self.pool)
            .await?;

        Ok(search::filter_sort_page(
            all,
            &normalize_for_search(term),
            params,
        ))
    }

    /// Bounded lookup for type-ahead widgets: name-only matching, `{id, name}`
    /// projection. A blank term short-circuits to empty without a store call.
    pub async fn search_by_term(
        &self,
        search_term: &str,
        max_results: i64,
    ) -> Result<Vec<CategoryLookup>, DatabaseError> {
        let term = search_term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let normalized = normalize_for_search(term);
        let all = sqlx::query_as::<_, CategoryLookup>("SELECT id, name FROM categories")
            .fetch_all(&self.pool)
            .await?;

        let mut matched: Vec<CategoryLookup> = all
            .into_iter()
            .filter(|c| normalize_for_search(&c.name).contains(&normalized))
            .collect();
        matched.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        matched.truncate(max_results.max(0) as usize);

        Ok(matched)
    }

    pub async fn insert(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, DatabaseError> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) \
             RETURNING id, name, description, created_date",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, DatabaseError> {
        let row = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, description = $3 WHERE id = $1 \
             RETURNING id, name, description, created_date",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| {
            DatabaseError::NotFound(format!("Category with id '{}' was not found", id))
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "Category with id '{}' was not found",
                id
            )));
        }
        Ok(())
    }
}
