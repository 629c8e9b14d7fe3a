//! Defines the HTTP routes for user management.
//!
//! Full-profile registration is public; the directory endpoints require a
//! valid bearer token.

use super::handlers::{create_user, get_user_by_id, list_users};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn user_router() -> Router {
    Router::new()
        .route("/", post(create_user))
        .route("/", get(list_users).layer(middleware::from_fn(jwt_auth)))
        .route(
            "/{id}",
            get(get_user_by_id).layer(middleware::from_fn(jwt_auth)),
        )
}
