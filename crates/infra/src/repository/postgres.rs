//! Postgres-backed product detail repository.
//!
//! ## Error Mapping
//!
//! | SQLx outcome | RepositoryError |
//! |--------------|-----------------|
//! | `fetch_optional` returned no row | `NotFound` |
//! | `UPDATE`/`DELETE` affected zero rows | `NotFound` |
//! | Database / pool / IO / decode errors | `Storage` |
//!
//! Keyword matching folds case with `lower()`, so non-ASCII folding follows
//! the database collation.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{FromRow, Row};
use tracing::instrument;

use catalog_core::{ProductDetailId, ProductId};
use catalog_products::{ProductDetail, ProductDetailRepository, RepositoryError, RepositoryResult};

const SCHEMA: &str = include_str!("../../migrations/0001_product_details.sql");

/// Postgres-backed product detail store.
///
/// Uses the SQLx connection pool, which is thread-safe (Arc + Send + Sync).
/// Each method is a single statement; there is no cross-call transaction.
#[derive(Debug, Clone)]
pub struct PostgresProductDetailRepository {
    pool: Arc<PgPool>,
}

impl PostgresProductDetailRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> RepositoryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `product_details` table if it is missing.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl ProductDetailRepository for PostgresProductDetailRepository {
    #[instrument(skip(self), err)]
    async fn find_all(&self) -> RepositoryResult<Vec<ProductDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT id, key, description, product_id
            FROM product_details
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        decode_rows(rows)
    }

    #[instrument(skip(self), err)]
    async fn find_by_keyword(&self, keyword: &str) -> RepositoryResult<Vec<ProductDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT id, key, description, product_id
            FROM product_details
            WHERE strpos(lower(key), lower($1)) > 0
               OR strpos(lower(description), lower($1)) > 0
            ORDER BY id ASC
            "#,
        )
        .bind(keyword)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_keyword", e))?;

        decode_rows(rows)
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: ProductDetailId) -> RepositoryResult<ProductDetail> {
        let row = sqlx::query(
            r#"
            SELECT id, key, description, product_id
            FROM product_details
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?
        .ok_or(RepositoryError::NotFound(id))?;

        decode_row(&row)
    }

    #[instrument(skip(self), err)]
    async fn exists_by_id(&self, id: ProductDetailId) -> RepositoryResult<bool> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM product_details WHERE id = $1) AS present")
            .bind(id.get())
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("exists_by_id", e))?;

        row.try_get::<bool, _>("present")
            .map_err(|e| map_sqlx_error("exists_by_id", e))
    }

    #[instrument(skip(self, detail), err)]
    async fn insert(&self, detail: ProductDetail) -> RepositoryResult<ProductDetail> {
        let row = sqlx::query(
            r#"
            INSERT INTO product_details (key, description, product_id)
            VALUES ($1, $2, $3)
            RETURNING id, key, description, product_id
            "#,
        )
        .bind(&detail.key)
        .bind(&detail.description)
        .bind(detail.product.map(i64::from))
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        decode_row(&row)
    }

    #[instrument(skip(self, detail), err)]
    async fn replace(
        &self,
        id: ProductDetailId,
        detail: ProductDetail,
    ) -> RepositoryResult<ProductDetail> {
        let row = sqlx::query(
            r#"
            UPDATE product_details
            SET key = $2, description = $3, product_id = $4
            WHERE id = $1
            RETURNING id, key, description, product_id
            "#,
        )
        .bind(id.get())
        .bind(&detail.key)
        .bind(&detail.description)
        .bind(detail.product.map(i64::from))
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("replace", e))?
        .ok_or(RepositoryError::NotFound(id))?;

        decode_row(&row)
    }

    #[instrument(skip(self), err)]
    async fn delete_by_id(&self, id: ProductDetailId) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM product_details WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => RepositoryError::storage(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            RepositoryError::storage(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            RepositoryError::storage(format!("connection pool timed out in {}", operation))
        }
        _ => RepositoryError::storage(format!("sqlx error in {}: {}", operation, err)),
    }
}

// SQLx row types

#[derive(Debug)]
struct ProductDetailRow {
    id: i64,
    key: String,
    description: String,
    product_id: Option<i64>,
}

impl<'r> FromRow<'r, PgRow> for ProductDetailRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductDetailRow {
            id: row.try_get("id")?,
            key: row.try_get("key")?,
            description: row.try_get("description")?,
            product_id: row.try_get("product_id")?,
        })
    }
}

impl TryFrom<ProductDetailRow> for ProductDetail {
    type Error = RepositoryError;

    fn try_from(row: ProductDetailRow) -> Result<Self, Self::Error> {
        let corrupt = |e: catalog_core::DomainError| {
            RepositoryError::storage(format!("corrupt product_details row {}: {}", row.id, e))
        };

        Ok(ProductDetail {
            id: Some(ProductDetailId::new(row.id).map_err(corrupt)?),
            key: row.key,
            description: row.description,
            product: row.product_id.map(ProductId::new).transpose().map_err(corrupt)?,
        })
    }
}

fn decode_row(row: &PgRow) -> RepositoryResult<ProductDetail> {
    ProductDetailRow::from_row(row)
        .map_err(|e| map_sqlx_error("decode_row", e))?
        .try_into()
}

fn decode_rows(rows: Vec<PgRow>) -> RepositoryResult<Vec<ProductDetail>> {
    rows.iter().map(decode_row).collect()
}
