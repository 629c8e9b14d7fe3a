//! Defines the HTTP routes for authentication.
//!
//! These routes handle registration, login, and token verification, and are
//! nested under `/api/auth` by the main Axum router.

use crate::auth::handlers::{login, register, verify};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify", get(verify).layer(middleware::from_fn(jwt_auth)))
}
