//! Billing store access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `businesses` - Business (tenant) operations
//! - `bills` - Bill insertion and filtered listing
//! - `bill_filter` - Query filter builder for bill listings
//! - `reports` - Sales overview and period groupings
//!
//! The billing store is owned by the billing application; the analytics
//! core only reads from it. The write paths here (`create_business`,
//! `insert_bill`, `soft_delete_bill`) exist for the demo seeder and tests.

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;

mod bill_filter;
mod bills;
mod businesses;
mod reports;

pub use bill_filter::{BillFilter, FilterResult};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Format a DateTime<Utc> the way SQLite stores it
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Billing store wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the billing store at the given path
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create an in-memory database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because every
    /// pooled connection must see the same database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = format!("/tmp/bizmitra_test_{}.db", id);

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Enable foreign keys
            PRAGMA foreign_keys = ON;

            -- WAL mode: readers don't block the (external) writer
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: good balance of safety and performance
            PRAGMA synchronous = NORMAL;

            -- Businesses (tenants owning billing records)
            CREATE TABLE IF NOT EXISTS businesses (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Bills (one billed transaction each)
            CREATE TABLE IF NOT EXISTS bills (
                id INTEGER PRIMARY KEY,
                business_id INTEGER NOT NULL REFERENCES businesses(id),
                bill_number TEXT NOT NULL,
                customer_name TEXT,
                subtotal REAL NOT NULL,
                discount REAL NOT NULL DEFAULT 0,
                total_amount REAL NOT NULL,
                payment_status TEXT NOT NULL DEFAULT 'PAID',
                created_at DATETIME NOT NULL,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                UNIQUE(business_id, bill_number)
            );

            CREATE INDEX IF NOT EXISTS idx_bills_business ON bills(business_id);
            CREATE INDEX IF NOT EXISTS idx_bills_business_created
                ON bills(business_id, created_at);
            "#,
        )?;

        info!(path = %self.db_path, "Billing store ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let db = Database::in_memory().unwrap();
        // Re-running migrations against an initialized store must not fail
        db.run_migrations().unwrap();
    }

    #[test]
    fn test_parse_datetime_round_trip() {
        let dt = parse_datetime("2026-03-15 10:30:00");
        assert_eq!(format_datetime(&dt), "2026-03-15 10:30:00");
    }
}
