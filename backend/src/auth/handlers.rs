//! Handler functions for authentication API endpoints.
//!
//! These functions parse incoming requests, delegate to `auth::service` for
//! the business logic, and shape the JSON responses.

use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json, http::StatusCode};

use crate::api::common::json_or_default;
use crate::auth::middleware::CurrentUser;
use crate::auth::models::{
    AuthResponse, AuthUserView, LoginPayload, RegisterPayload, VerifyResponse,
};
use crate::auth::service::AuthService;
use crate::errors::ServiceError;
use crate::state::AppState;

/// Handle user registration
#[axum::debug_handler]
pub async fn register(
    Extension(state): Extension<AppState>,
    payload: Result<Json<RegisterPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ServiceError> {
    let payload = json_or_default(payload);
    let (token, user) = AuthService::new(state.users.as_ref(), &state.jwt)
        .register(&payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully",
            token,
            user: AuthUserView::registered(&user),
        }),
    ))
}

/// Handle user login
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> Result<Json<AuthResponse>, ServiceError> {
    let payload = json_or_default(payload);
    let (token, user) = AuthService::new(state.users.as_ref(), &state.jwt)
        .login(&payload)
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful",
        token,
        user: AuthUserView::compact(&user),
    }))
}

/// Report the user behind a valid token
#[axum::debug_handler]
pub async fn verify(
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<VerifyResponse>, ServiceError> {
    Ok(Json(VerifyResponse {
        message: "Token is valid",
        user: AuthUserView::compact(&current.user),
    }))
}
