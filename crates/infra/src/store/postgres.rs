//! Postgres-backed product store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | `ColumnDecode` / `ColumnNotFound` / `Decode` | `Corrupt` |
//! | anything else (database, pool closed, IO, TLS) | `Unavailable` |
//!
//! Every message carries the failing operation name.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use tracing::{instrument, Span};

use stockroom_core::{PageRequest, ProductId};
use stockroom_products::{Product, ProductFields};

use super::{ProductFilter, ProductStore, StoreError};

const SCHEMA: &str = include_str!("../../migrations/0001_products.sql");

const COLUMNS: &str = "id, name, quantity, color, created_at, updated_at";

/// Postgres-backed product store.
///
/// `id` is a `BIGSERIAL`, so ids increase monotonically and are never reused.
/// Both timestamps are set by the database.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: Arc<PgPool>,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self, fields), fields(name = %fields.name()), err)]
    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO products (name, quantity, color) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(fields.name())
        .bind(i64::from(fields.quantity()))
        .bind(fields.color())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        row_to_product(&row)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref().map(row_to_product).transpose()
    }

    #[instrument(skip(self, fields), fields(product_id = %id), err)]
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE products
            SET name = $2, quantity = $3, color = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id.as_i64())
        .bind(fields.name())
        .bind(i64::from(fields.quantity()))
        .bind(fields.color())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        row.as_ref().map(row_to_product).transpose()
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(
        skip(self, filter),
        fields(
            search = ?filter.term(),
            page = page.page(),
            per_page = page.per_page(),
            result_count = tracing::field::Empty
        ),
        err
    )]
    async fn search(&self, filter: &ProductFilter, page: PageRequest) -> Result<(Vec<Product>, u64), StoreError> {
        let pattern = filter.term().map(|t| format!("%{}%", escape_like(t)));

        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM products WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\')"#,
        )
        .bind(pattern.as_deref())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("search_count", e))?;

        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let rows = sqlx::query(&format!(
            r#"
            SELECT {COLUMNS}
            FROM products
            WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\')
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(pattern.as_deref())
        .bind(i64::from(page.limit()))
        .bind(offset)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("search", e))?;

        let items = rows.iter().map(row_to_product).collect::<Result<Vec<_>, _>>()?;

        Span::current().record("result_count", items.len());
        Ok((items, u64::try_from(total).unwrap_or(0)))
    }
}

/// Escape `ILIKE` metacharacters so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

struct ProductRow {
    id: i64,
    name: String,
    quantity: i64,
    color: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            quantity: row.try_get("quantity")?,
            color: row.try_get("color")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

fn row_to_product(row: &PgRow) -> Result<Product, StoreError> {
    let row = ProductRow::from_row(row).map_err(|e| map_sqlx_error("decode_row", e))?;
    let fields = ProductFields::new(row.name, row.quantity, row.color)
        .map_err(|e| StoreError::Corrupt(format!("product {}: {e}", row.id)))?;
    Ok(Product::new(ProductId::from_i64(row.id), fields, row.created_at, row.updated_at))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) | sqlx::Error::Decode(_) => {
            StoreError::Corrupt(format!("failed to decode row in {operation}: {err}"))
        }
        sqlx::Error::Database(db_err) => {
            StoreError::Unavailable(format!("database error in {operation}: {}", db_err.message()))
        }
        sqlx::Error::PoolClosed => StoreError::Unavailable(format!("connection pool closed in {operation}")),
        _ => StoreError::Unavailable(format!("sqlx error in {operation}: {err}")),
    }
}
