//! Persistence contracts and their SQLite implementations.
//!
//! Services depend on the `UserStore` and `ProductStore` traits, never on a
//! concrete backend. The sqlx repositories here are the production
//! implementations; tests substitute doubles for failure paths.

use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{NewProduct, NewUser, Product, ProductChanges, ProductId, User};
use crate::errors::ServiceError;

pub mod product_repository;
pub mod user_repository;

pub use product_repository::ProductRepository;
pub use user_repository::UserRepository;

/// Storage-level failure, kept separate from `ServiceError` so repositories
/// stay usable outside the HTTP stack.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("duplicate value for {field}")]
    Duplicate { field: &'static str },

    /// The backend could not be reached or timed out acquiring a connection.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                // SQLite reports "UNIQUE constraint failed: <table>.<column>".
                let field = if db.message().contains(".email") {
                    "email"
                } else {
                    "id"
                };
                return StoreError::Duplicate { field };
            }
        }
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Backend(other.into()),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field: "email" } => {
                ServiceError::conflict("email", "Email already registered")
            }
            StoreError::Duplicate { field } => {
                ServiceError::conflict(field, format!("Duplicate value for {field}"))
            }
            StoreError::Unavailable(message) => ServiceError::unavailable(message),
            StoreError::Backend(source) => ServiceError::Internal { source },
        }
    }
}

/// Sortable product columns exposed through the list API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    CreatedAt,
    UpdatedAt,
    Title,
    Price,
}

impl ProductSortField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "createdAt" => Some(ProductSortField::CreatedAt),
            "updatedAt" => Some(ProductSortField::UpdatedAt),
            "title" => Some(ProductSortField::Title),
            "price" => Some(ProductSortField::Price),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            ProductSortField::CreatedAt => "created_at",
            ProductSortField::UpdatedAt => "updated_at",
            ProductSortField::Title => "title",
            ProductSortField::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Parsed `sort` query value, e.g. `price` or `-createdAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: ProductSortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parses the wire form; `None` for fields outside the whitelist, which
    /// callers turn into the default sort instead of an error.
    pub fn parse(raw: &str) -> Option<Self> {
        let (direction, name) = match raw.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, raw),
        };
        ProductSortField::parse(name).map(|field| SortSpec { field, direction })
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec {
            field: ProductSortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

/// Resolved listing parameters handed to the product store.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    pub keyword: Option<String>,
    pub sort: SortSpec,
    pub limit: u32,
    pub offset: u32,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. A duplicate email surfaces as
    /// `StoreError::Duplicate` from the unique index, not from a pre-check.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    /// Active reachability probe, used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Cheap liveness check with no I/O, used by the auth gate before it
    /// touches the request.
    fn is_available(&self) -> bool;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError>;

    async fn find_by_public_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Applies the non-`None` fields; `None` result means the id is unknown.
    async fn update(
        &self,
        id: &ProductId,
        changes: ProductChanges,
    ) -> Result<Option<Product>, StoreError>;

    /// Removes the product, returning the deleted row for the response body.
    async fn delete(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Returns one page of products plus the total match count.
    async fn list(&self, query: &ProductListQuery) -> Result<(Vec<Product>, u64), StoreError>;
}
