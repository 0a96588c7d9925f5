//! # Category Repository
//!
//! Database operations for categories. Category names are unique; the
//! UNIQUE index on `categories.name` is what enforces it.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use insight_core::{Category, NewCategory};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories in storage order.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = categories.len(), "Listed categories");
        Ok(categories)
    }

    /// Gets a category by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Category))` - Category found
    /// * `Ok(None)` - Category not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Gets a category by its (unique) name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at
            FROM categories
            WHERE name = ?1
            "#,
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Checks whether a category with this ID exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found != 0)
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - Inserted category with its assigned ID
    /// * `Err(DbError::UniqueViolation)` - Name already taken
    /// * `Err(DbError::Invalid)` - Name empty or too long
    pub async fn insert(&self, new_category: &NewCategory) -> DbResult<Category> {
        new_category.validate()?;

        let name = new_category.name.trim().to_string();
        let created_at = Utc::now();

        debug!(name = %name, "Inserting category");

        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, created_at)
            VALUES (?1, ?2)
            "#,
        )
        .bind(name.as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, name.clone()),
            other => other,
        })?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name,
            created_at,
        })
    }

    /// Returns the category with this name, inserting it first if needed.
    pub async fn get_or_create(&self, name: &str) -> DbResult<Category> {
        if let Some(category) = self.get_by_name(name).await? {
            return Ok(category);
        }

        self.insert(&NewCategory::new(name)).await
    }

    /// Counts total categories (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn repo() -> CategoryRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.categories()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;

        let created = repo.insert(&NewCategory::new("Software")).await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Software");
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn test_missing_id_is_none() {
        let repo = repo().await;
        assert!(repo.get_by_id(999).await.unwrap().is_none());
        assert!(!repo.exists(999).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let repo = repo().await;
        repo.insert(&NewCategory::new("Hardware")).await.unwrap();

        let err = repo.insert(&NewCategory::new("Hardware")).await.unwrap_err();
        match err {
            DbError::UniqueViolation { value, .. } => assert_eq!(value, "Hardware"),
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_name_is_trimmed() {
        let repo = repo().await;
        let created = repo.insert(&NewCategory::new("  Cloud ")).await.unwrap();
        assert_eq!(created.name, "Cloud");

        let err = repo.insert(&NewCategory::new("Cloud")).await.unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[tokio::test]
    async fn test_empty_name_rejected_before_insert() {
        let repo = repo().await;
        let err = repo.insert(&NewCategory::new("")).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_in_insert_order() {
        let repo = repo().await;
        for name in ["Web", "Mobile", "IoT"] {
            repo.insert(&NewCategory::new(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Web", "Mobile", "IoT"]);
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let repo = repo().await;
        let first = repo.get_or_create("Blockchain").await.unwrap();
        let second = repo.get_or_create("Blockchain").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
