//! # Dashboard Repository
//!
//! Dashboards plus their metrics and feedback.
//!
//! ## Loading Details
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   list_with_details(limit = 100)                        │
//! │                                                                         │
//! │  1. SELECT * FROM dashboards                       (1 query)           │
//! │  2. metrics,  ROW_NUMBER() per dashboard ≤ limit   (1 query)           │
//! │  3. feedback, ROW_NUMBER() per dashboard ≤ limit   (1 query)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  group rows by dashboard_id, attach to each dashboard                  │
//! │                                                                         │
//! │  Three queries total regardless of how many dashboards exist.          │
//! │  Rows kept per dashboard are the newest `limit` by created_at,         │
//! │  returned in id order.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use insight_core::{Dashboard, Feedback, Metric, NewDashboard, NewFeedback, NewMetric};

/// Repository for dashboard database operations.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    /// Creates a new DashboardRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DashboardRepository { pool }
    }

    /// Lists dashboards without their metrics or feedback.
    pub async fn list(&self) -> DbResult<Vec<Dashboard>> {
        let dashboards = sqlx::query_as::<_, Dashboard>(
            r#"
            SELECT id, name, description, created_at
            FROM dashboards
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(dashboards)
    }

    /// Lists dashboards with metrics and feedback attached.
    ///
    /// Each collection holds at most `limit` entries per dashboard: the
    /// newest by creation time (ties broken by id), in ascending id order.
    pub async fn list_with_details(&self, limit: u32) -> DbResult<Vec<Dashboard>> {
        let mut dashboards = self.list().await?;
        if dashboards.is_empty() {
            return Ok(dashboards);
        }

        let limit = i64::from(limit.max(1));

        let metrics = sqlx::query_as::<_, Metric>(
            r#"
            SELECT id, dashboard_id, name, value, unit, created_at
            FROM (
                SELECT m.*,
                       ROW_NUMBER() OVER (
                           PARTITION BY m.dashboard_id
                           ORDER BY m.created_at DESC, m.id DESC
                       ) AS rn
                FROM metrics m
            )
            WHERE rn <= ?1
            ORDER BY dashboard_id, id
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT id, dashboard_id, message, sentiment, created_at
            FROM (
                SELECT f.*,
                       ROW_NUMBER() OVER (
                           PARTITION BY f.dashboard_id
                           ORDER BY f.created_at DESC, f.id DESC
                       ) AS rn
                FROM feedback f
            )
            WHERE rn <= ?1
            ORDER BY dashboard_id, id
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            dashboards = dashboards.len(),
            metrics = metrics.len(),
            feedback = feedback.len(),
            limit,
            "Loaded dashboard details"
        );

        let mut metrics_by_dashboard: HashMap<i64, Vec<Metric>> = HashMap::new();
        for metric in metrics {
            metrics_by_dashboard
                .entry(metric.dashboard_id)
                .or_default()
                .push(metric);
        }

        let mut feedback_by_dashboard: HashMap<i64, Vec<Feedback>> = HashMap::new();
        for entry in feedback {
            feedback_by_dashboard
                .entry(entry.dashboard_id)
                .or_default()
                .push(entry);
        }

        for dashboard in &mut dashboards {
            dashboard.metrics = metrics_by_dashboard.remove(&dashboard.id).unwrap_or_default();
            dashboard.feedback = feedback_by_dashboard.remove(&dashboard.id).unwrap_or_default();
        }

        Ok(dashboards)
    }

    /// Gets the first dashboard with this name, without details.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Dashboard>> {
        let dashboard = sqlx::query_as::<_, Dashboard>(
            r#"
            SELECT id, name, description, created_at
            FROM dashboards
            WHERE name = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(dashboard)
    }

    pub async fn insert_dashboard(&self, new_dashboard: &NewDashboard) -> DbResult<Dashboard> {
        new_dashboard.validate()?;

        let name = new_dashboard.name.trim().to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO dashboards (name, description, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(name.as_str())
        .bind(new_dashboard.description.as_str())
        .bind(new_dashboard.created_at)
        .execute(&self.pool)
        .await?;

        Ok(Dashboard {
            id: result.last_insert_rowid(),
            name,
            description: new_dashboard.description.clone(),
            created_at: new_dashboard.created_at,
            metrics: Vec::new(),
            feedback: Vec::new(),
        })
    }

    /// Inserts a metric.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - `dashboard_id` doesn't exist
    pub async fn insert_metric(&self, new_metric: &NewMetric) -> DbResult<Metric> {
        new_metric.validate()?;

        let result = sqlx::query(
            r#"
            INSERT INTO metrics (dashboard_id, name, value, unit, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(new_metric.dashboard_id)
        .bind(new_metric.name.as_str())
        .bind(new_metric.value)
        .bind(new_metric.unit.as_str())
        .bind(new_metric.created_at)
        .execute(&self.pool)
        .await?;

        Ok(Metric {
            id: result.last_insert_rowid(),
            dashboard_id: new_metric.dashboard_id,
            name: new_metric.name.clone(),
            value: new_metric.value,
            unit: new_metric.unit.clone(),
            created_at: new_metric.created_at,
        })
    }

    /// Inserts a feedback entry.
    pub async fn insert_feedback(&self, new_feedback: &NewFeedback) -> DbResult<Feedback> {
        new_feedback.validate()?;

        let result = sqlx::query(
            r#"
            INSERT INTO feedback (dashboard_id, message, sentiment, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(new_feedback.dashboard_id)
        .bind(new_feedback.message.as_str())
        .bind(new_feedback.sentiment.as_str())
        .bind(new_feedback.created_at)
        .execute(&self.pool)
        .await?;

        Ok(Feedback {
            id: result.last_insert_rowid(),
            dashboard_id: new_feedback.dashboard_id,
            message: new_feedback.message.clone(),
            sentiment: new_feedback.sentiment,
            created_at: new_feedback.created_at,
        })
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dashboards")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_metrics(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM metrics")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_feedback(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
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
    use chrono::{Duration, TimeZone, Utc};
    use insight_core::Sentiment;

    async fn repo() -> DashboardRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.dashboards()
    }

    fn new_dashboard(name: &str) -> NewDashboard {
        NewDashboard {
            name: name.to_string(),
            description: format!("{name} overview"),
            created_at: Utc::now(),
        }
    }

    fn metric(dashboard_id: i64, name: &str, minutes_ago: i64) -> NewMetric {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        NewMetric {
            dashboard_id,
            name: name.to_string(),
            value: 42.0,
            unit: "%".to_string(),
            created_at: base - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let repo = repo().await;
        assert!(repo.list_with_details(100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_details_attached_to_owner() {
        let repo = repo().await;
        let sales = repo.insert_dashboard(&new_dashboard("Sales")).await.unwrap();
        let ops = repo.insert_dashboard(&new_dashboard("Operations")).await.unwrap();

        repo.insert_metric(&metric(sales.id, "Revenue", 1)).await.unwrap();
        repo.insert_metric(&metric(ops.id, "Uptime", 1)).await.unwrap();
        repo.insert_feedback(&NewFeedback {
            dashboard_id: ops.id,
            message: "Works well".to_string(),
            sentiment: Sentiment::Positive,
            created_at: Utc::now(),
        })
        .await
        .unwrap();

        let dashboards = repo.list_with_details(100).await.unwrap();
        assert_eq!(dashboards.len(), 2);

        assert_eq!(dashboards[0].name, "Sales");
        assert_eq!(dashboards[0].metrics.len(), 1);
        assert_eq!(dashboards[0].metrics[0].name, "Revenue");
        assert!(dashboards[0].feedback.is_empty());

        assert_eq!(dashboards[1].metrics[0].name, "Uptime");
        assert_eq!(dashboards[1].feedback.len(), 1);
        assert_eq!(dashboards[1].feedback[0].sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_detail_limit_keeps_newest() {
        let repo = repo().await;
        let dashboard = repo.insert_dashboard(&new_dashboard("Capped")).await.unwrap();

        // Inserted oldest-first: m0 is 50 minutes old, m4 is 10.
        for i in 0..5 {
            let name = format!("m{i}");
            repo.insert_metric(&metric(dashboard.id, &name, 50 - i * 10))
                .await
                .unwrap();
        }

        let dashboards = repo.list_with_details(3).await.unwrap();
        let names: Vec<&str> = dashboards[0].metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["m2", "m3", "m4"]);
        assert_eq!(repo.count_metrics().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_plain_list_has_no_details() {
        let repo = repo().await;
        let dashboard = repo.insert_dashboard(&new_dashboard("Plain")).await.unwrap();
        repo.insert_metric(&metric(dashboard.id, "Latency", 5)).await.unwrap();

        let dashboards = repo.list().await.unwrap();
        assert!(dashboards[0].metrics.is_empty());
    }

    #[tokio::test]
    async fn test_metric_requires_dashboard() {
        let repo = repo().await;
        let err = repo.insert_metric(&metric(77, "Orphan", 0)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let repo = repo().await;
        let created = repo.insert_dashboard(&new_dashboard("Marketing")).await.unwrap();

        let found = repo.get_by_name("Marketing").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.get_by_name("Finance").await.unwrap().is_none());
    }
}
