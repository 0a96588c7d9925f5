//! # Demo Data Seeding
//!
//! Fills an empty database with a catalog, six months of sales history and
//! a handful of dashboards so the frontend has something to draw.
//!
//! ## Idempotency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  categories / products / dashboards  → get-or-create by name           │
//! │  sales                               → only when the table is empty    │
//! │  metrics                             → only when the table is empty    │
//! │  feedback                            → only when the table is empty    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are derived from row indexes rather than a random source, so two
//! fresh databases seeded on the same day hold the same numbers.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use insight_core::{
    Dashboard, NewDashboard, NewFeedback, NewMetric, NewProduct, NewSale, Product, Sentiment,
};

/// Categories, each with its products as (name, price).
const CATALOG: &[(&str, &[(&str, f64)])] = &[
    (
        "Software",
        &[
            ("AI Assistant Pro", 99.99),
            ("Data Analytics Suite", 299.00),
            ("Project Management Tool", 45.00),
            ("CRM Enterprise", 199.00),
            ("Accounting Pro", 89.99),
        ],
    ),
    (
        "Hardware",
        &[
            ("Smart Camera v2", 149.50),
            ("Edge Gateway", 89.00),
            ("Industrial Sensor", 75.25),
            ("Server Rack X900", 4500.00),
            ("Network Switch 48-Port", 1299.99),
        ],
    ),
    (
        "Services",
        &[
            ("Premium Support", 500.00),
            ("Consulting Package", 2500.00),
            ("Training Program", 1200.00),
            ("Implementation Service", 3500.00),
        ],
    ),
    (
        "Cloud",
        &[
            ("Cloud Storage 1TB", 12.00),
            ("Compute Instance", 85.00),
            ("Database Hosting", 150.00),
            ("CDN Service", 45.00),
        ],
    ),
    (
        "AI/ML",
        &[
            ("ML Model Training", 899.00),
            ("Vision API", 45.00),
            ("NLP Toolkit", 299.00),
        ],
    ),
    (
        "Cybersecurity",
        &[
            ("Firewall Suite", 599.00),
            ("Penetration Testing", 2500.00),
            ("Threat Intelligence", 1500.00),
        ],
    ),
    ("IoT", &[("IoT Hub", 299.00), ("Sensor Pack", 99.00)]),
    (
        "Blockchain",
        &[("Smart Contract Audit", 5000.00), ("DLT Integration", 7500.00)],
    ),
    (
        "Mobile",
        &[("Mobile App Framework", 199.00), ("Push Notification Service", 49.00)],
    ),
    ("Web", &[("Web Hosting Pro", 29.99), ("SSL Certificate", 89.00)]),
];

/// Dashboards as (name, description, age in days).
const DASHBOARDS: &[(&str, &str, i64)] = &[
    ("Executive Overview", "High-level metrics for executives and stakeholders", 180),
    ("Sales Performance", "Detailed sales analytics and revenue tracking", 120),
    ("Product Analytics", "Product usage, performance, and customer feedback", 90),
    ("Customer Insights", "Customer behavior and feedback analysis", 60),
    ("Technical Metrics", "System performance, uptime, and technical KPIs", 30),
];

/// Metric kinds as (name, unit, min, max).
const METRIC_KINDS: &[(&str, &str, f64, f64)] = &[
    ("Revenue", "USD", 10_000.0, 500_000.0),
    ("Active Users", "users", 100.0, 10_000.0),
    ("Monthly Recurring Revenue", "USD", 5_000.0, 200_000.0),
    ("Customer Churn Rate", "%", 0.5, 15.0),
    ("Customer Satisfaction", "score", 3.5, 5.0),
    ("Response Time", "ms", 50.0, 2_000.0),
    ("Uptime", "%", 95.0, 99.99),
    ("Conversion Rate", "%", 1.0, 25.0),
    ("Customer Acquisition Cost", "USD", 50.0, 500.0),
    ("Lifetime Value", "USD", 500.0, 5_000.0),
];

const FEEDBACK_MESSAGES: &[(&str, Sentiment)] = &[
    ("Great dashboard! Very intuitive and helpful.", Sentiment::Positive),
    ("The metrics are exactly what our team needs.", Sentiment::Positive),
    ("Love the new visualization features!", Sentiment::Positive),
    ("This has improved our decision-making process significantly.", Sentiment::Positive),
    ("The real-time updates are fantastic.", Sentiment::Positive),
    ("Could use more export options.", Sentiment::Neutral),
    ("The data seems accurate but interface could be better.", Sentiment::Neutral),
    ("It gets the job done.", Sentiment::Neutral),
    ("Would like to see more customization options.", Sentiment::Neutral),
    ("Good overall, but loading times could be improved.", Sentiment::Neutral),
    ("Too many clicks to get to important data.", Sentiment::Negative),
    ("Some metrics seem inaccurate.", Sentiment::Negative),
    ("Mobile experience needs improvement.", Sentiment::Negative),
    ("Hard to share reports with the team.", Sentiment::Negative),
    ("Frequently times out with large datasets.", Sentiment::Negative),
];

const HISTORY_MONTHS: usize = 6;
const CURRENT_MONTH_SALES: usize = 50;
const FEEDBACK_PER_DASHBOARD: usize = 10;

/// Row counts after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub categories: i64,
    pub products: i64,
    pub sales: i64,
    pub dashboards: i64,
    pub metrics: i64,
    pub feedback: i64,
}

/// Seeds demo data. Safe to call on every startup.
pub async fn seed_demo_data(db: &Database) -> DbResult<SeedSummary> {
    info!("Seeding demo data");
    let now = Utc::now();

    let products = seed_catalog(db).await?;

    if db.sales().count().await? == 0 {
        seed_sales(db, &generate_sales(&products, now)).await?;
    }

    let dashboards = seed_dashboards(db, now).await?;

    if db.dashboards().count_metrics().await? == 0 {
        for (d, dashboard) in dashboards.iter().enumerate() {
            for (t, (name, unit, min, max)) in METRIC_KINDS.iter().enumerate() {
                let fraction = spread(d * METRIC_KINDS.len() + t, 1000) as f64 / 1000.0;
                db.dashboards()
                    .insert_metric(&NewMetric {
                        dashboard_id: dashboard.id,
                        name: name.to_string(),
                        value: min + fraction * (max - min),
                        unit: unit.to_string(),
                        created_at: now,
                    })
                    .await?;
            }
        }
    }

    if db.dashboards().count_feedback().await? == 0 {
        for (d, dashboard) in dashboards.iter().enumerate() {
            for i in 0..FEEDBACK_PER_DASHBOARD {
                let key = d * FEEDBACK_PER_DASHBOARD + i;
                let (message, sentiment) = FEEDBACK_MESSAGES[spread(key, FEEDBACK_MESSAGES.len())];
                db.dashboards()
                    .insert_feedback(&NewFeedback {
                        dashboard_id: dashboard.id,
                        message: message.to_string(),
                        sentiment,
                        created_at: now - Duration::days(spread(key + 7, 90) as i64),
                    })
                    .await?;
            }
        }
    }

    let summary = SeedSummary {
        categories: db.categories().count().await?,
        products: db.products().count().await?,
        sales: db.sales().count().await?,
        dashboards: db.dashboards().count().await?,
        metrics: db.dashboards().count_metrics().await?,
        feedback: db.dashboards().count_feedback().await?,
    };

    info!(
        categories = summary.categories,
        products = summary.products,
        sales = summary.sales,
        dashboards = summary.dashboards,
        metrics = summary.metrics,
        feedback = summary.feedback,
        "Seeding complete"
    );

    Ok(summary)
}

/// Sales are only generated into an empty table, so a partly written
/// history would never be topped up later. Report it instead.
async fn seed_sales(db: &Database, sales: &[NewSale]) -> DbResult<()> {
    let written = db.sales().insert_batch(sales).await?;
    if written < sales.len() {
        return Err(DbError::IncompleteBatch {
            written,
            requested: sales.len(),
        });
    }

    info!(written, "Generated sales history");
    Ok(())
}

async fn seed_catalog(db: &Database) -> DbResult<Vec<Product>> {
    let mut products = Vec::new();

    for (category_name, items) in CATALOG {
        let category = db.categories().get_or_create(category_name).await?;

        for (name, price) in items.iter() {
            let product = match db.products().get_by_name(name).await? {
                Some(existing) => existing,
                None => {
                    db.products()
                        .insert(&NewProduct::new(*name, category.id, *price))
                        .await?
                }
            };
            products.push(product);
        }
    }

    Ok(products)
}

async fn seed_dashboards(db: &Database, now: DateTime<Utc>) -> DbResult<Vec<Dashboard>> {
    let mut dashboards = Vec::with_capacity(DASHBOARDS.len());

    for (name, description, age_days) in DASHBOARDS {
        let dashboard = match db.dashboards().get_by_name(name).await? {
            Some(existing) => existing,
            None => {
                db.dashboards()
                    .insert_dashboard(&NewDashboard {
                        name: name.to_string(),
                        description: description.to_string(),
                        created_at: now - Duration::days(*age_days),
                    })
                    .await?
            }
        };
        dashboards.push(dashboard);
    }

    Ok(dashboards)
}

/// Six months of 2-4 sales per product per month, plus a burst of sales in
/// the current month. Roughly one sale in ten is discounted.
fn generate_sales(products: &[Product], now: DateTime<Utc>) -> Vec<NewSale> {
    let mut sales = Vec::new();

    for (p, product) in products.iter().enumerate() {
        for month in 0..HISTORY_MONTHS {
            let key = p * HISTORY_MONTHS + month;
            let base_quantity = 5 + month * 3 + spread(key, 10);
            let per_month = 2 + spread(key + 1, 3);

            for n in 0..per_month {
                let sale_key = key * 4 + n;
                let quantity = (base_quantity + spread(sale_key, 5)).saturating_sub(2).max(1);
                let day = 1 + spread(sale_key + 3, 30);

                let mut unit_price = product.price;
                if spread(sale_key + 5, 10) == 0 {
                    unit_price *= 0.8 + 0.2 * spread(sale_key + 11, 100) as f64 / 100.0;
                }

                sales.push(NewSale {
                    product_id: product.id,
                    quantity: quantity as i64,
                    revenue: quantity as f64 * unit_price,
                    date: now - Duration::days((month * 30 + day) as i64),
                });
            }
        }
    }

    if !products.is_empty() {
        for i in 0..CURRENT_MONTH_SALES {
            let product = &products[spread(i + 1000, products.len())];
            let quantity = 1 + spread(i + 2000, 10);
            sales.push(NewSale {
                product_id: product.id,
                quantity: quantity as i64,
                revenue: quantity as f64 * product.price,
                date: now - Duration::days(spread(i + 3000, 30) as i64),
            });
        }
    }

    sales
}

/// Maps an index onto `0..modulo`, scattering neighbouring keys.
fn spread(key: usize, modulo: usize) -> usize {
    let mixed = (key as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    ((mixed >> 33) % modulo as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;

    fn product_count() -> usize {
        CATALOG.iter().map(|(_, items)| items.len()).sum()
    }

    #[test]
    fn test_spread_in_range() {
        for key in 0..500 {
            assert!(spread(key, 7) < 7);
        }
        assert_eq!(spread(42, 10), spread(42, 10));
    }

    #[test]
    fn test_catalog_shape() {
        assert_eq!(CATALOG.len(), 10);
        assert_eq!(product_count(), 32);
        assert_eq!(FEEDBACK_MESSAGES.len(), 15);
    }

    #[test]
    fn test_generated_sales_bounds() {
        let now = Utc::now();
        let products: Vec<Product> = (1..=4)
            .map(|id| Product {
                id,
                name: format!("P{id}"),
                category_id: 1,
                price: 10.0,
                created_at: now,
            })
            .collect();

        let sales = generate_sales(&products, now);

        let history = sales.len() - CURRENT_MONTH_SALES;
        assert!(history >= 4 * HISTORY_MONTHS * 2);
        assert!(history <= 4 * HISTORY_MONTHS * 4);
        for sale in &sales {
            assert!(sale.quantity >= 1);
            assert!(sale.revenue > 0.0);
            assert!(sale.revenue <= sale.quantity as f64 * 10.0 + 1e-9);
            assert!(sale.date <= now);
        }
    }

    #[tokio::test]
    async fn test_seed_populates_everything() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let summary = seed_demo_data(&db).await.unwrap();

        assert_eq!(summary.categories, 10);
        assert_eq!(summary.products, 32);
        assert_eq!(summary.dashboards, 5);
        assert_eq!(summary.metrics, 50);
        assert_eq!(summary.feedback, 50);
        assert!(summary.sales >= (32 * HISTORY_MONTHS * 2 + CURRENT_MONTH_SALES) as i64);
        assert!(summary.sales <= (32 * HISTORY_MONTHS * 4 + CURRENT_MONTH_SALES) as i64);
    }

    #[tokio::test]
    async fn test_seed_twice_does_not_duplicate() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let first = seed_demo_data(&db).await.unwrap();
        let second = seed_demo_data(&db).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_partial_sales_history_is_an_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let products = seed_catalog(&db).await.unwrap();

        let mut sales = generate_sales(&products, Utc::now());
        let last = sales.len() - 1;
        sales[last].product_id = 999_999;

        let err = seed_sales(&db, &sales).await.unwrap_err();
        match err {
            DbError::IncompleteBatch { written, requested } => {
                assert_eq!(requested, sales.len());
                assert!(written < requested);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_seeded_dashboards_carry_details() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_demo_data(&db).await.unwrap();

        let dashboards = db.dashboards().list_with_details(100).await.unwrap();
        assert_eq!(dashboards.len(), 5);
        for dashboard in &dashboards {
            assert_eq!(dashboard.metrics.len(), METRIC_KINDS.len());
            assert_eq!(dashboard.feedback.len(), FEEDBACK_PER_DASHBOARD);
        }
    }
}
