//! Health check endpoint.
//!
//! Reports service liveness and the result of an active database ping.

use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{Value, json};

use crate::state::AppState;

/// Reports service health. Always 200; a failed database ping downgrades
/// `status` to `degraded` rather than failing the check.
#[axum::debug_handler]
pub async fn health_check(Extension(state): Extension<AppState>) -> Json<Value> {
    let (status, database) = match state.users.ping().await {
        Ok(()) => ("healthy", "connected"),
        Err(err) => {
            tracing::warn!("health check ping failed: {err}");
            ("degraded", "unavailable")
        }
    };

    Json(json!({
        "status": status,
        "message": "API is running",
        "database": database,
        "timestamp": Utc::now().to_rfc3339(),
        "environment": state.environment.as_str(),
    }))
}
