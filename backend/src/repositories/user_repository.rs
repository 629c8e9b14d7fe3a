//! Database repository for user management operations.
//!
//! Provides persistence for registered users.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{NewUser, User};
use crate::repositories::{StoreError, UserStore};

/// Repository for user database operations.
///
/// Handles all persistence operations for the User entity. Email uniqueness
/// is enforced by the database index, so a duplicate insert fails atomically
/// instead of racing a pre-check.
pub struct UserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool (internally reference counted)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, phone, password_hash, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, 1, ?)
            RETURNING id, name, email, phone, password_hash, is_active, created_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone, password_hash, is_active, created_at
            FROM users WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone, password_hash, is_active, created_at
            FROM users WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone, password_hash, is_active, created_at
            FROM users ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.pool.is_closed()
    }
}
