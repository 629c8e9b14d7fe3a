//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. API-facing response shapes live next to their handlers;
//! nothing here serializes to clients directly, which keeps password hashes
//! and internal row ids out of response bodies by construction.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Client-visible product identifier.
///
/// Products also carry an internal integer row id; only this UUID string is
/// ever exchanged with clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn generate() -> Self {
        ProductId(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        ProductId(value)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for `users`. The id is assigned by the caller so the service
/// layer can build the token subject without a read-back.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
}

impl NewUser {
    pub fn with_generated_id(
        name: String,
        email: String,
        phone: Option<String>,
        password_hash: String,
    ) -> Self {
        NewUser {
            id: Uuid::now_v7().to_string(),
            name,
            email,
            phone,
            password_hash,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub public_id: ProductId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub public_id: ProductId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub created_by: String,
}

/// Partial update for a product. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
    }
}
