//! # Repository Module
//!
//! Database repository implementations for Insight.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().list_by_category(3)                             │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self)                                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list_by_category(&self, category_id)                              │
//! │  └── insert(&self, new_product)                                        │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository holds a clone of the pool and nothing else; none of them
//! open explicit transactions except the seed-only batch sale insert.
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Categories
//! - [`ProductRepository`](product::ProductRepository) - Products, per-category listing
//! - [`SaleRepository`](sale::SaleRepository) - Sales
//! - [`DashboardRepository`](dashboard::DashboardRepository) - Dashboards, metrics, feedback

pub mod category;
pub mod dashboard;
pub mod product;
pub mod sale;
