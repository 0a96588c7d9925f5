//! # Sale Repository
//!
//! Database operations for sales.
//!
//! Sales are only ever written by seeding; the API reads them. Bulk seeding
//! goes through [`SaleRepository::insert_batch`], which writes in chunks of
//! [`SALE_BATCH_SIZE`] rows, one transaction per chunk.

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use insight_core::{NewSale, Sale};

/// Rows written per transaction by [`SaleRepository::insert_batch`].
pub const SALE_BATCH_SIZE: usize = 100;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Lists all sales in storage order.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, product_id, quantity, revenue, date
            FROM sales
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = sales.len(), "Listed sales");
        Ok(sales)
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, product_id, quantity, revenue, date
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Inserts a single sale.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - `product_id` doesn't exist
    pub async fn insert(&self, new_sale: &NewSale) -> DbResult<Sale> {
        new_sale.validate()?;

        debug!(product_id = new_sale.product_id, quantity = new_sale.quantity, "Inserting sale");

        let result = sqlx::query(
            r#"
            INSERT INTO sales (product_id, quantity, revenue, date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(new_sale.product_id)
        .bind(new_sale.quantity)
        .bind(new_sale.revenue)
        .bind(new_sale.date)
        .execute(&self.pool)
        .await?;

        Ok(Sale {
            id: result.last_insert_rowid(),
            product_id: new_sale.product_id,
            quantity: new_sale.quantity,
            revenue: new_sale.revenue,
            date: new_sale.date,
        })
    }

    /// Inserts many sales, [`SALE_BATCH_SIZE`] rows per transaction.
    ///
    /// A chunk that fails is rolled back and logged; later chunks still run.
    /// Returns the number of rows actually written.
    pub async fn insert_batch(&self, sales: &[NewSale]) -> DbResult<usize> {
        let mut written = 0;

        for (index, chunk) in sales.chunks(SALE_BATCH_SIZE).enumerate() {
            match self.insert_chunk(chunk).await {
                Ok(()) => written += chunk.len(),
                Err(e) => warn!(chunk = index, error = %e, "Failed to insert sales chunk"),
            }
        }

        debug!(written, requested = sales.len(), "Batch sale insert complete");
        Ok(written)
    }

    async fn insert_chunk(&self, chunk: &[NewSale]) -> DbResult<()> {
        for sale in chunk {
            sale.validate()?;
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        for sale in chunk {
            sqlx::query(
                r#"
                INSERT INTO sales (product_id, quantity, revenue, date)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(sale.product_id)
            .bind(sale.quantity)
            .bind(sale.revenue)
            .bind(sale.date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Counts total sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
