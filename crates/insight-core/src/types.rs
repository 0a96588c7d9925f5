//! # Domain Types
//!
//! Core domain types used throughout Insight.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog & Sales                      Reporting                         │
//! │  ───────────────                      ─────────                         │
//! │  ┌─────────────┐                      ┌─────────────┐                   │
//! │  │  Category   │                      │  Dashboard  │                   │
//! │  │  name (uniq)│                      │  name       │                   │
//! │  └──────┬──────┘                      └──┬───────┬──┘                   │
//! │         │ 1..*                      1..* │       │ 1..*                 │
//! │  ┌──────▼──────┐               ┌─────────▼─┐   ┌─▼──────────┐           │
//! │  │  Product    │               │  Metric   │   │  Feedback  │           │
//! │  │  price      │               │  value    │   │  sentiment │           │
//! │  └──────┬──────┘               │  unit     │   │  message   │           │
//! │         │ 1..*                 └───────────┘   └────────────┘           │
//! │  ┌──────▼──────┐                                                        │
//! │  │    Sale     │                                                        │
//! │  │  quantity   │                                                        │
//! │  │  revenue    │                                                        │
//! │  └─────────────┘                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The dashboard frontend consumes PascalCase keys with upper-case id
//! suffixes (`ID`, `CategoryID`, `ProductID`, `DashboardID`). Every type in
//! this module serializes that way, and ts-rs exports matching TypeScript.
//!
//! ## Identity
//! Every entity is keyed by a 64-bit autoincrement integer assigned by the
//! database. Entities are insert-only: nothing here is ever updated or deleted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{
    validate_finite, validate_name, validate_non_negative, validate_quantity, ValidationResult,
};

// =============================================================================
// Category
// =============================================================================

/// A product category. Names are unique across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub struct Category {
    #[serde(rename = "ID")]
    pub id: i64,

    pub name: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Body of a category creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    /// Creates a new category request.
    pub fn new(name: impl Into<String>) -> Self {
        NewCategory { name: name.into() }
    }

    /// Checks the request before it reaches the database.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("Name", &self.name)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog. Always belongs to exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: i64,

    pub name: String,

    #[serde(rename = "CategoryID")]
    pub category_id: i64,

    /// Unit price. Stored as REAL, matching what the frontend expects.
    pub price: f64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A product together with its owning category, as returned by the
/// category listing. Serializes as the product's keys plus `Category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,

    #[serde(rename = "Category")]
    pub category: Category,
}

/// Body of a product creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,

    #[serde(rename = "CategoryID")]
    pub category_id: i64,

    pub price: f64,
}

impl NewProduct {
    /// Creates a new product request.
    pub fn new(name: impl Into<String>, category_id: i64, price: f64) -> Self {
        NewProduct {
            name: name.into(),
            category_id,
            price,
        }
    }

    /// Checks the request before it reaches the database.
    ///
    /// Whether `category_id` points at a real category is a storage question
    /// and is checked by the caller.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("Name", &self.name)?;
        validate_non_negative("Price", self.price)?;
        Ok(())
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub struct Sale {
    #[serde(rename = "ID")]
    pub id: i64,

    #[serde(rename = "ProductID")]
    pub product_id: i64,

    pub quantity: i64,

    pub revenue: f64,

    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

/// A sale to be inserted (seeding only; there is no sale creation endpoint).
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub product_id: i64,
    pub quantity: i64,
    pub revenue: f64,
    pub date: DateTime<Utc>,
}

impl NewSale {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_quantity(self.quantity)?;
        validate_finite("Revenue", self.revenue)?;
        Ok(())
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// A reporting dashboard with its metrics and feedback.
///
/// `metrics` and `feedback` are filled by the repository after the row
/// itself is read; see `DashboardRepository::list_with_details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub struct Dashboard {
    #[serde(rename = "ID")]
    pub id: i64,

    pub name: String,

    pub description: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub metrics: Vec<Metric>,

    #[serde(default)]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub feedback: Vec<Feedback>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDashboard {
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl NewDashboard {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("Name", &self.name)
    }
}

// =============================================================================
// Metric
// =============================================================================

/// A single numeric reading shown on a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub struct Metric {
    #[serde(rename = "ID")]
    pub id: i64,

    #[serde(rename = "DashboardID")]
    pub dashboard_id: i64,

    pub name: String,

    pub value: f64,

    /// Display unit, e.g. "USD", "%", "ms".
    pub unit: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMetric {
    pub dashboard_id: i64,
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

impl NewMetric {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("Name", &self.name)?;
        validate_finite("Value", self.value)?;
        Ok(())
    }
}

// =============================================================================
// Feedback
// =============================================================================

/// Sentiment tag attached to a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All sentiments, in display order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ValidationError;

    /// Parses a sentiment tag, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Sentiment::ALL
            .into_iter()
            .find(|sentiment| sentiment.as_str() == tag)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "Sentiment".to_string(),
                allowed: Sentiment::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            })
    }
}

/// A piece of user feedback left on a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub struct Feedback {
    #[serde(rename = "ID")]
    pub id: i64,

    #[serde(rename = "DashboardID")]
    pub dashboard_id: i64,

    pub message: String,

    pub sentiment: Sentiment,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub dashboard_id: i64,
    pub message: String,
    pub sentiment: Sentiment,
    pub created_at: DateTime<Utc>,
}

impl NewFeedback {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.message.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "Message".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
