//! Defines the HTTP routes for the product catalog.
//!
//! Every product endpoint requires a valid bearer token.

use super::handlers::{
    create_product, delete_product, get_product, list_products, update_product,
};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

pub fn product_router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/", post(create_product))
        .route("/{id}", get(get_product))
        .route("/{id}", put(update_product))
        .route("/{id}", delete(delete_product))
        .layer(middleware::from_fn(jwt_auth))
}
