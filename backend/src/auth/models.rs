//! Data structures for authentication requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::User;

/// Registration request payload. Every field is optional so missing values
/// surface as validation messages instead of deserialization failures.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request payload
#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User information returned by the auth endpoints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserView {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AuthUserView {
    /// Full shape used right after registration.
    pub fn registered(user: &User) -> Self {
        AuthUserView {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: Some(user.created_at),
        }
    }

    /// Reduced shape used for login and token verification.
    pub fn compact(user: &User) -> Self {
        AuthUserView {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: None,
        }
    }
}

/// Response containing a fresh token and the authenticated user
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: AuthUserView,
}

/// Response for token verification
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub message: &'static str,
    pub user: AuthUserView,
}
