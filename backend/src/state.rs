//! Shared application state injected into every handler.
//!
//! Built once in `main` and layered as an axum `Extension`. Handlers and
//! middleware reach the stores through trait objects, so tests can swap in
//! doubles or an in-memory database without touching the routers.

use std::sync::Arc;

use crate::config::Environment;
use crate::repositories::{ProductStore, UserStore};
use crate::utils::jwt::JwtUtils;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub products: Arc<dyn ProductStore>,
    pub jwt: Arc<JwtUtils>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        products: Arc<dyn ProductStore>,
        jwt: Arc<JwtUtils>,
        environment: Environment,
    ) -> Self {
        AppState {
            users,
            products,
            jwt,
            environment,
        }
    }
}
