//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Listing and lookup by ID
//! - Per-category listing with the category relation loaded
//! - Insert
//!
//! ## Category Relation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 list_by_category(3)                                     │
//! │                                                                         │
//! │  products p  INNER JOIN  categories c  ON c.id = p.category_id          │
//! │  WHERE p.category_id = 3                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────┐                      │
//! │  │ p.id | p.name       | ... | c.name | c.created_at │                  │
//! │  │ 18   | Vision API   | ... | AI/ML  | ...          │                  │
//! │  │ 19   | NLP Toolkit  | ... | AI/ML  | ...          │                  │
//! │  └──────────────────────────────────────────────┘                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductWithCategory { product, category }                             │
//! │                                                                         │
//! │  One query, no per-row lookups.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use insight_core::{Category, NewProduct, Product, ProductWithCategory};

/// Row shape of the product/category join.
#[derive(Debug, sqlx::FromRow)]
struct ProductCategoryRow {
    id: i64,
    name: String,
    category_id: i64,
    price: f64,
    created_at: DateTime<Utc>,
    category_name: String,
    category_created_at: DateTime<Utc>,
}

impl From<ProductCategoryRow> for ProductWithCategory {
    fn from(row: ProductCategoryRow) -> Self {
        ProductWithCategory {
            product: Product {
                id: row.id,
                name: row.name,
                category_id: row.category_id,
                price: row.price,
                created_at: row.created_at,
            },
            category: Category {
                id: row.category_id,
                name: row.category_name,
                created_at: row.category_created_at,
            },
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let all = repo.list().await?;
/// let product = repo.get_by_id(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products in storage order. The category relation is not loaded.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category_id, price, created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category_id, price, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets the first product with this name (seeding uses names as keys).
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category_id, price, created_at
            FROM products
            WHERE name = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists the products of one category, each with its category loaded.
    ///
    /// An empty result does not say whether the category exists; callers
    /// that care check the category first.
    pub async fn list_by_category(&self, category_id: i64) -> DbResult<Vec<ProductWithCategory>> {
        debug!(category_id, "Listing products by category");

        let rows = sqlx::query_as::<_, ProductCategoryRow>(
            r#"
            SELECT
                p.id,
                p.name,
                p.category_id,
                p.price,
                p.created_at,
                c.name AS category_name,
                c.created_at AS category_created_at
            FROM products p
            INNER JOIN categories c ON c.id = p.category_id
            WHERE p.category_id = ?1
            ORDER BY p.id
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductWithCategory::from).collect())
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with its assigned ID
    /// * `Err(DbError::ForeignKeyViolation)` - `category_id` doesn't exist
    /// * `Err(DbError::Invalid)` - Empty name, negative or non-finite price
    pub async fn insert(&self, new_product: &NewProduct) -> DbResult<Product> {
        new_product.validate()?;

        let name = new_product.name.trim().to_string();
        let created_at = Utc::now();

        debug!(name = %name, category_id = new_product.category_id, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, category_id, price, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(name.as_str())
        .bind(new_product.category_id)
        .bind(new_product.price)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name,
            category_id: new_product.category_id,
            price: new_product.price,
            created_at,
        })
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::{Database, DbConfig};
    use insight_core::NewCategory;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = db().await;
        let category = db.categories().insert(&NewCategory::new("Software")).await.unwrap();

        let created = db
            .products()
            .insert(&NewProduct::new("Widget", category.id, 9.99))
            .await
            .unwrap();

        let fetched = db.products().get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Widget");
        assert_eq!(fetched.price, 9.99);
        assert_eq!(fetched.category_id, category.id);
    }

    #[tokio::test]
    async fn test_unknown_category_violates_foreign_key() {
        let db = db().await;

        let err = db
            .products()
            .insert(&NewProduct::new("Orphan", 404, 1.0))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let db = db().await;
        let category = db.categories().insert(&NewCategory::new("Web")).await.unwrap();

        let err = db
            .products()
            .insert(&NewProduct::new("SSL Certificate", category.id, -89.0))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_list_by_category_loads_category() {
        let db = db().await;
        let cloud = db.categories().insert(&NewCategory::new("Cloud")).await.unwrap();
        let iot = db.categories().insert(&NewCategory::new("IoT")).await.unwrap();

        db.products().insert(&NewProduct::new("CDN Service", cloud.id, 45.0)).await.unwrap();
        db.products().insert(&NewProduct::new("IoT Hub", iot.id, 299.0)).await.unwrap();
        db.products().insert(&NewProduct::new("Compute Instance", cloud.id, 85.0)).await.unwrap();

        let products = db.products().list_by_category(cloud.id).await.unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.product.name.as_str()).collect();
        assert_eq!(names, vec!["CDN Service", "Compute Instance"]);

        for loaded in &products {
            assert_eq!(loaded.product.category_id, cloud.id);
            assert_eq!(loaded.category.id, cloud.id);
            assert_eq!(loaded.category.name, "Cloud");
        }
    }

    #[tokio::test]
    async fn test_list_by_category_empty() {
        let db = db().await;
        let mobile = db.categories().insert(&NewCategory::new("Mobile")).await.unwrap();

        assert!(db.products().list_by_category(mobile.id).await.unwrap().is_empty());
        assert!(db.products().list_by_category(12345).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_returns_everything() {
        let db = db().await;
        let category = db.categories().insert(&NewCategory::new("Services")).await.unwrap();
        for (name, price) in [("Premium Support", 500.0), ("Training Program", 1200.0)] {
            db.products()
                .insert(&NewProduct::new(name, category.id, price))
                .await
                .unwrap();
        }

        let products = db.products().list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.category_id == category.id));
    }
}
