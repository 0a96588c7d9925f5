//! # insight-db: Database Layer for Insight
//!
//! SQLite storage for the analytics backend, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Insight Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (GET /api/productByCategory/3)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     insight-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ CategoryRepo  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ 001_initial  │  │   │
//! │  │   │ Connection    │    │ SaleRepo      │    │   _schema    │  │   │
//! │  │   │ Management    │    │ DashboardRepo │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   seed.rs: demo catalog, sales history, dashboards              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   database/app.db                                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per table family
//! - [`seed`] - Idempotent demo data
//!
//! ## Usage
//!
//! ```rust,ignore
//! use insight_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("database/app.db")).await?;
//!
//! let products = db.products().list_by_category(3).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};
pub use seed::{seed_demo_data, SeedSummary};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::dashboard::DashboardRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
