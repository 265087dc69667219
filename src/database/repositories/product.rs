use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Product;
use crate::search::{self, normalize_for_search, PageParams};

// Every product read joins the owning category so category_name is always
// populated on the way out.
const SELECT_PRODUCT: &str = "SELECT p.id, p.name, p.description, p.price, p.stock, \
     p.category_id, c.name AS category_name, p.created_date \
     FROM products p JOIN categories c ON c.id = p.category_id";

pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DatabaseError> {
        let row = sqlx::query_as::<_, Product>(&format!("{} WHERE p.id = $1", SELECT_PRODUCT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Product, DatabaseError> {
        self.find_by_id(id).await?.ok_or_else(|| {
            DatabaseError::NotFound(format!("Product with id '{}' was not found", id))
        })
    }

    /// Exact-name lookup for the uniqueness pre-check, case-insensitive.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Product>, DatabaseError> {
        let row = sqlx::query_as::<_, Product>(&format!(
            "{} WHERE lower(p.name) = lower($1)",
            SELECT_PRODUCT
        ))
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let found: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// One page of products plus the pre-paging total count. Same two-path
    /// split as categories; the filtered path additionally matches the joined
    /// category name.
    pub async fn get_paged(
        &self,
        params: PageParams,
        search_term: Option<&str>,
    ) -> Result<(Vec<Product>, i64), DatabaseError> {
        let term = search_term.map(str::trim).unwrap_or_default();

        if term.is_empty() {
            let (total_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
                .fetch_one(&self.pool)
                .await?;

            let items = sqlx::query_as::<_, Product>(&format!(
                "{} ORDER BY lower(p.name), p.id LIMIT $1 OFFSET $2",
                SELECT_PRODUCT
            ))
            .bind(params.page_size)
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await?;

            return Ok((items, total_count));
        }

        let all = sqlx::query_as::<_, Product>(SELECT_PRODUCT)
            .fetch_all(&self.pool)
            .await?;

        Ok(search::filter_sort_page(
            all,
            &normalize_for_search(term),
            params,
        ))
    }

    pub async fn insert(
        &self,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        stock: i32,
        category_id: Uuid,
    ) -> Result<Product, DatabaseError> {
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO products (name, description, price, stock, category_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(stock)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        // Re-read through the join so the response carries category_name
        self.get_by_id(id).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        stock: i32,
        category_id: Uuid,
    ) -> Result<Product, DatabaseError> {
        let result = sqlx::query(
            "UPDATE products SET name = $2, description = $3, price = $4, stock = $5, \
             category_id = $6 WHERE id = $1",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(stock)
        .bind(category_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "Product with id '{}' was not found",
                id
            )));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "Product with id '{}' was not found",
                id
            )));
        }
        Ok(())
    }
}
