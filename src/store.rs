//! Durable Product Store
//!
//! SQLite-backed storage of product records via `sqlx`. This is the single
//! source of truth: the cache layer only mirrors rows that were first
//! persisted here. Each method executes one statement, so every call is
//! atomic under SQLite's implicit per-statement transaction.
//!
//! The schema is created at connect time, and a small sample data set can be
//! seeded into an empty database at startup.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;
use uuid::Uuid;

use crate::models::Product;

/// Maximum pooled connections against a file-backed database.
const MAX_CONNECTIONS: u32 = 5;

/// Upper bound on waiting for a pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_TABLE_SQL: &str = "\
CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    price REAL NOT NULL,
    stock_quantity INTEGER NOT NULL
)";

// == Product Store ==
/// Durable keyed store of product records.
///
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ProductStore {
    pool: SqlitePool,
}

impl ProductStore {
    // == Connect ==
    /// Connects to the database at `database_url` and ensures the schema
    /// exists.
    ///
    /// In-memory URLs pin the pool to a single connection: every fresh
    /// SQLite `:memory:` connection is a distinct empty database.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let max_connections = if in_memory { 1 } else { MAX_CONNECTIONS };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_TABLE_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }

    // == Get By Id ==
    /// Fetches the record with the given identifier, or `None` if absent.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, stock_quantity FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    // == Insert ==
    /// Persists a new record. The identifier is supplied by the caller.
    pub async fn insert(&self, product: &Product) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO products (id, name, description, price, stock_quantity) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock_quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // == Update ==
    /// Persists an already-merged record as a full-row update.
    ///
    /// Returns `false` if no row matched the identifier, which happens when
    /// the record was deleted between the caller's fetch and this write.
    pub async fn update(&self, product: &Product) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET name = ?, description = ?, price = ?, stock_quantity = ? \
             WHERE id = ?",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(&product.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // == Delete ==
    /// Removes the record with the given identifier.
    ///
    /// Returns `false` if no row matched the identifier.
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // == Count ==
    /// Returns the number of persisted records.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
    }

    // == Seeding ==
    /// Inserts the sample catalog iff the store is empty.
    ///
    /// Re-running against the same database leaves it unchanged.
    pub async fn seed_sample_products(&self) -> Result<(), sqlx::Error> {
        if self.count().await? > 0 {
            return Ok(());
        }

        let samples = [
            ("Wireless Mouse", "Ergonomic 2.4GHz wireless mouse", 24.99, 120),
            ("Mechanical Keyboard", "RGB backlit mechanical keyboard", 79.50, 75),
            ("USB-C Hub", "7-in-1 USB-C hub for laptops", 39.00, 200),
        ];

        for (name, description, price, stock_quantity) in samples {
            let product = Product {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                description: description.to_string(),
                price,
                stock_quantity,
            };
            self.insert(&product).await?;
        }

        info!("Seeded {} sample products", samples.len());
        Ok(())
    }
}
