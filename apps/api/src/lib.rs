//! # Insight API
//!
//! REST server backing the analytics dashboard.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Insight API Routes                             │
//! │                                                                         │
//! │  CorsLayer ─► TraceLayer ─► /api                                       │
//! │                              │                                          │
//! │  ┌────────────────┐  ┌───────┴────────┐  ┌────────────────────────────┐│
//! │  │  Categories    │  │  Products      │  │  Sales                     ││
//! │  │                │  │                │  │                            ││
//! │  │ • /categories  │  │ • /products    │  │ • /sales                   ││
//! │  │ • /category/id │  │ • /product/id  │  │ • /sale/id                 ││
//! │  │ • /addCategory │  │ • /addProduct  │  │                            ││
//! │  │                │  │ • /productBy-  │  │                            ││
//! │  │                │  │   Category/id  │  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐                                │
//! │  │  Dashboards    │  │  Health        │                                │
//! │  │ • /dashboard   │  │ • /health      │                                │
//! │  └────────────────┘  └────────────────┘                                │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                   insight-db (SQLite pool)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - listen port (default: 8080)
//! - `BIND_ADDR` - listen address (default: 0.0.0.0)
//! - `DATABASE_PATH` - SQLite file (default: database/app.db)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `CORS_ORIGIN` - allowed browser origin (default: http://localhost:3000)
//! - `SEED_DEMO_DATA` - seed demo data on startup (default: true)
//! - `DASHBOARD_DETAIL_LIMIT` - per-dashboard metric/feedback cap (default: 100)

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
