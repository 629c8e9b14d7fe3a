//! Shared fixtures for router and middleware tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::config::Environment;
use crate::database::models::{NewProduct, NewUser, Product, ProductChanges, ProductId, User};
use crate::database::test_pool;
use crate::repositories::{
    ProductListQuery, ProductRepository, ProductStore, StoreError, UserRepository, UserStore,
};
use crate::services::user_service;
use crate::state::AppState;
use crate::utils::jwt::{Claims, JwtUtils};

pub const TEST_SECRET: &str = "test-support-secret";

/// App state over a fresh in-memory database.
pub async fn app_state() -> AppState {
    let pool = test_pool().await;
    AppState::new(
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(ProductRepository::new(pool)),
        Arc::new(JwtUtils::new(TEST_SECRET, 3600)),
        Environment::Development,
    )
}

/// Inserts a user directly through the store and returns the row.
pub async fn seed_user(state: &AppState, email: &str) -> User {
    let password_hash = user_service::hash_password("seeded-password").unwrap();
    state
        .users
        .insert(NewUser::with_generated_id(
            "Seed User".to_string(),
            email.to_string(),
            None,
            password_hash,
        ))
        .await
        .unwrap()
}

/// Signs a token for `user` with the test secret whose expiry is already past.
pub fn expired_token(user: &User) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        capabilities: Vec::new(),
        exp: (now - 3600) as usize,
        iat: (now - 7200) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Store double whose every call reports the backend as unreachable.
pub struct OfflineStore;

#[async_trait]
impl UserStore for OfflineStore {
    async fn insert(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[async_trait]
impl ProductStore for OfflineStore {
    async fn insert(&self, _product: NewProduct) -> Result<Product, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn find_by_public_id(&self, _id: &ProductId) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn update(
        &self,
        _id: &ProductId,
        _changes: ProductChanges,
    ) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn delete(&self, _id: &ProductId) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    async fn list(&self, _query: &ProductListQuery) -> Result<(Vec<Product>, u64), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

/// App state whose stores are offline, for 503 paths.
pub fn offline_app_state() -> AppState {
    AppState::new(
        Arc::new(OfflineStore),
        Arc::new(OfflineStore),
        Arc::new(JwtUtils::new(TEST_SECRET, 3600)),
        Environment::Development,
    )
}
