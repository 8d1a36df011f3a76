use crate::domain::model::ProductRecord;
use crate::domain::ports::Sink;
use crate::utils::error::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Row, SqlitePool};
use std::path::Path;

const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    item_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    price REAL,
    price_with_discount REAL,
    quantity INTEGER NOT NULL,
    score_of_ratings REAL,
    number_of_ratings INTEGER,
    photo_reference TEXT,
    warranty TEXT,
    url TEXT
)";

const INSERT_PRODUCT: &str = "\
INSERT OR IGNORE INTO products
    (item_id, name, price, price_with_discount, quantity,
     score_of_ratings, number_of_ratings, photo_reference, warranty, url)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// Relational sink. Rows are keyed on the upstream product id; a record seen
/// twice is ignored on the second insert, and records without an id cannot
/// be keyed at all and are skipped.
pub struct SqliteSink {
    pool: SqlitePool,
}

impl SqliteSink {
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn stored_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get(0))
    }
}

#[async_trait]
impl Sink for SqliteSink {
    async fn store(&self, records: &[ProductRecord]) -> Result<()> {
        let mut inserted = 0u64;
        let mut duplicates = 0u64;
        let mut unkeyed = 0u64;

        for record in records {
            let Some(item_id) = record.id.as_deref() else {
                unkeyed += 1;
                continue;
            };

            let result = sqlx::query(INSERT_PRODUCT)
                .bind(item_id)
                .bind(record.name.as_str())
                .bind(record.price)
                .bind(record.price_with_discount)
                .bind(record.quantity_available)
                .bind(record.score_of_ratings)
                .bind(record.number_of_ratings)
                .bind(record.photo_reference.as_deref())
                .bind(record.warranty.as_deref())
                .bind(record.url.as_deref())
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                duplicates += 1;
            } else {
                inserted += 1;
            }
        }

        tracing::info!(inserted, duplicates, unkeyed, "sqlite store finished");
        Ok(())
    }
}
