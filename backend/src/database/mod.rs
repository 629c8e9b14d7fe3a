//! Module for database connection setup and common utilities.
//!
//! This module is responsible for initializing the database connection pool,
//! applying the idempotent schema bootstrap, and providing a central point for
//! database-related helpers.

use crate::config::Config;
use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

pub mod models;

/// Schema applied at startup. Every statement is idempotent, so re-running on
/// an existing database is a no-op. The unique index on `email` is what turns
/// duplicate registrations into constraint violations instead of races.
const BOOTSTRAP_DDL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT,
        password_hash TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email)",
    "CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        public_id TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        price REAL NOT NULL CHECK (price > 0),
        image TEXT NOT NULL,
        created_by TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_products_created_at ON products(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_products_created_by ON products(created_by)",
];

pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// Initializes the database connection pool.
    pub async fn new(config: &Config) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect_with(options)
            .await?;

        let database = Database { pool };
        database.bootstrap().await?;

        Ok(database)
    }

    /// Applies the idempotent schema statements.
    pub async fn bootstrap(&self) -> Result<()> {
        for statement in BOOTSTRAP_DDL {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Database {
            pool: self.pool.clone(),
        }
    }
}

/// In-memory pool with the schema applied. Single connection: each SQLite
/// `:memory:` connection is its own database, so a larger pool would hand out
/// empty databases.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    for statement in BOOTSTRAP_DDL {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("bootstrap statement");
    }
    pool
}
