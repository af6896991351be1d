//! Postgres-backed product store.
//!
//! Expects a `products` table shaped like:
//!
//! ```sql
//! CREATE TABLE products (
//!     id          BIGSERIAL PRIMARY KEY,
//!     name        TEXT NOT NULL,
//!     price       DOUBLE PRECISION NOT NULL CHECK (price >= 0),
//!     available   BOOLEAN NOT NULL DEFAULT TRUE,
//!     created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! CREATE INDEX products_available_idx ON products (available, id);
//! ```
//!
//! Creating the table is left to the deployment's migration tooling.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique / foreign key / check / not-null violation) | `23505`, `23503`, `23514`, `23502` | `Constraint` |
//! | Database (other) | Any other | `Backend` |
//! | PoolTimedOut, PoolClosed, Io, Tls | N/A | `Unavailable` |
//! | Other | N/A | `Backend` |

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use catalog_products::{CreateProduct, Product, ProductId, ProductPatch, ProductStore, StoreError};

use crate::config::DatabaseConfig;

const PRODUCT_COLUMNS: &str = "id, name, price, available, created_at, updated_at";

/// Postgres-backed product store.
///
/// The pool is created lazily; [`ProductStore::connect`] is what actually
/// proves the database is reachable, and [`ProductStore::disconnect`] closes
/// the pool. `PgPool` is itself a shared handle, so clones of the store use
/// the same connections.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    /// Create a new store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a lazily-connecting pool from configuration.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy(&config.url)
            .map_err(|e| map_sqlx_error("connect_lazy", e))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_row(
        &self,
        operation: &str,
        sql: &str,
        id: ProductId,
    ) -> Result<Product, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;

        row.map(Product::from).ok_or(StoreError::Missing(id))
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
    available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            available: row.available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), err)]
    async fn connect(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn disconnect(&self) -> Result<(), StoreError> {
        self.pool.close().await;
        Ok(())
    }

    #[instrument(skip(self, product), fields(name = %product.name), err)]
    async fn insert(&self, product: CreateProduct) -> Result<Product, StoreError> {
        let sql = format!(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&product.name)
            .bind(product.price)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert", e))?;
        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn count_available(&self) -> Result<u64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE available = TRUE")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("count_available", e))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    #[instrument(skip(self), err)]
    async fn count_all(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_all", e))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    #[instrument(skip(self), err)]
    async fn scan(
        &self,
        offset: u64,
        limit: u64,
        available_only: bool,
    ) -> Result<Vec<Product>, StoreError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE ($1 = FALSE OR available = TRUE) \
             ORDER BY id ASC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(available_only)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("scan", e))?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_by_id", e))?;
        Ok(row.map(Product::from))
    }

    #[instrument(skip(self, ids), fields(id_count = ids.len()), err)]
    async fn get_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let sql =
            format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1) ORDER BY id ASC");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(raw)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_by_ids", e))?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self, patch), err)]
    async fn apply_update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        let sql = format!(
            "UPDATE products SET \
                 name = COALESCE($2, name), \
                 price = COALESCE($3, price), \
                 updated_at = now() \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.get())
            .bind(patch.name)
            .bind(patch.price)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("apply_update", e))?;
        row.map(Product::from).ok_or(StoreError::Missing(id))
    }

    #[instrument(skip(self), err)]
    async fn mark_unavailable(&self, id: ProductId) -> Result<Product, StoreError> {
        let sql = format!(
            "UPDATE products SET available = FALSE, updated_at = now() \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );
        self.fetch_row("mark_unavailable", &sql, id).await
    }
}

/// Map SQLx errors to store errors.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") | Some("23503") | Some("23514") | Some("23502") => {
                    StoreError::Constraint(msg)
                }
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool timed out in {operation}"))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => StoreError::Unavailable(format!("tls error in {operation}: {e}")),
        other => StoreError::Backend(format!("sqlx error in {operation}: {other}")),
    }
}
