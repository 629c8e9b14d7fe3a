//! Handler functions for user management API endpoints.
//!
//! These functions process full-profile registration and user directory
//! requests and shape the JSON responses.

use axum::extract::rejection::JsonRejection;
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
};
use serde::Serialize;

use crate::api::common::json_or_default;
use crate::errors::ServiceError;
use crate::services::user_service::{ProfileView, SignupPayload, UserService};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub message: &'static str,
    pub token: String,
    pub user: ProfileView,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub message: &'static str,
    pub users: Vec<ProfileView>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub message: &'static str,
    pub user: ProfileView,
}

/// Registers a full profile and signs the first token.
#[axum::debug_handler]
pub async fn create_user(
    Extension(state): Extension<AppState>,
    payload: Result<Json<SignupPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), ServiceError> {
    let payload = json_or_default(payload);
    let (token, user) = UserService::new(state.users.as_ref(), &state.jwt)
        .create_full(&payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            message: "User created successfully",
            token,
            user: ProfileView::created(&user),
        }),
    ))
}

/// Lists every registered user.
#[axum::debug_handler]
pub async fn list_users(
    Extension(state): Extension<AppState>,
) -> Result<Json<UserListResponse>, ServiceError> {
    let users = UserService::new(state.users.as_ref(), &state.jwt)
        .list_users()
        .await?;
    let users: Vec<ProfileView> = users.iter().map(ProfileView::directory).collect();

    Ok(Json(UserListResponse {
        message: "Users retrieved successfully",
        count: users.len(),
        users,
    }))
}

/// Retrieves a user by its ID.
#[axum::debug_handler]
pub async fn get_user_by_id(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ServiceError> {
    let user = UserService::new(state.users.as_ref(), &state.jwt)
        .get_user(&id)
        .await?;

    Ok(Json(UserResponse {
        message: "User retrieved successfully",
        user: ProfileView::directory(&user),
    }))
}
