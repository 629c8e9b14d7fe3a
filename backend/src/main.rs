//! Main entry point for the product management backend.
//!
//! This file initializes the Axum web server, sets up the database pool,
//! and registers all API routes and middleware.
//! It orchestrates the application's startup and defines its overall structure.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod state;
mod utils;
mod validation;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use repositories::{ProductRepository, UserRepository};
use serde_json::{Value, json};
use state::AppState;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utils::jwt::JwtUtils;

#[tokio::main]
async fn main() {
    let config = Config::from_env().unwrap();
    api::common::set_environment(config.environment);

    let default_level = if config.environment.is_development() {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .init();

    let db = Database::new(&config).await.unwrap();
    let pool = db.pool().clone();

    let state = AppState::new(
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(ProductRepository::new(pool)),
        Arc::new(JwtUtils::new(
            &config.jwt_secret,
            config.jwt_expires_in_seconds,
        )),
        config.environment,
    );

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/api/health", get(api::health::health_check))
        .nest("/api/auth", auth::routes::auth_router())
        .nest("/api/users", api::user::routes::user_router())
        .nest("/api/products", api::product::routes::product_router())
        .fallback(api::common::endpoint_not_found)
        .layer(Extension(state))
        .layer(cors);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!(
        "Starting product management server on port {}",
        config.server_port
    );
    axum::serve(listener, app).await.unwrap();
}

async fn root_handler(Extension(state): Extension<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Product Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "environment": state.environment.as_str(),
        "endpoints": [
            "/api/health",
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/verify",
            "/api/users",
            "/api/products"
        ]
    }))
}
