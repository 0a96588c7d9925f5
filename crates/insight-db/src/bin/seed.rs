//! # Seed Data Generator
//!
//! Populates a database with the demo dataset the API also seeds on startup.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p insight-db --bin seed
//!
//! # Specify database path
//! cargo run -p insight-db --bin seed -- --db ./data/app.db
//! ```
//!
//! ## Generated Data
//! - 10 categories, 32 products
//! - Six months of sales per product, plus current-month sales
//! - 5 dashboards with 10 metrics and 10 feedback entries each
//!
//! Re-running against a seeded database adds nothing.

use std::env;
use std::path::Path;

use insight_db::{seed_demo_data, Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("database/app.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Insight Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: database/app.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("🌱 Insight Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    if let Some(parent) = Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let start = std::time::Instant::now();
    let summary = seed_demo_data(&db).await?;

    println!();
    println!("✓ Seed complete in {:?}", start.elapsed());
    println!("  Categories: {}", summary.categories);
    println!("  Products:   {}", summary.products);
    println!("  Sales:      {}", summary.sales);
    println!("  Dashboards: {}", summary.dashboards);
    println!("  Metrics:    {}", summary.metrics);
    println!("  Feedback:   {}", summary.feedback);

    db.close().await;
    Ok(())
}
