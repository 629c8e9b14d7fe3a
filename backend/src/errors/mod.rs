//! Global application error types and handlers.
//!
//! This module defines the error taxonomy used across the entire backend
//! application. HTTP rendering of these errors (status codes and JSON bodies)
//! lives in `crate::api::common`.

use thiserror::Error;

use crate::validation::FieldErrors;

/// Reason an authenticated request was rejected.
///
/// Each variant renders a distinct client-facing message so callers can tell
/// the failure modes apart without inspecting anything beyond the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `Authorization` header was present on the request.
    MissingToken,
    /// The header was present but not of the form `Bearer <token>`.
    MalformedHeader,
    /// The token was well-formed but past its expiration instant.
    TokenExpired,
    /// The token failed signature or structural checks.
    TokenInvalid,
    /// The token verified but its subject no longer resolves to a user.
    UnknownUser,
    /// Login rejection: unknown email or wrong password.
    InvalidCredentials,
}

impl AuthFailure {
    /// Client-facing message for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::MissingToken => "Token is missing",
            AuthFailure::MalformedHeader => "Invalid token format",
            AuthFailure::TokenExpired => "Token has expired",
            AuthFailure::TokenInvalid => "Token is invalid",
            AuthFailure::UnknownUser => "User not found",
            AuthFailure::InvalidCredentials => "Invalid email or password",
        }
    }
}

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {errors:?}")]
    Validation { errors: FieldErrors },

    #[error("Conflict on {field}: {message}")]
    Conflict { field: String, message: String },

    #[error("Unauthenticated: {}", reason.message())]
    Unauthenticated { reason: AuthFailure },

    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    #[error("Internal error: {source}")]
    Internal {
        #[from]
        source: anyhow::Error,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation { errors }
    }

    pub fn conflict(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unauthenticated(reason: AuthFailure) -> Self {
        Self::Unauthenticated { reason }
    }

    pub fn not_found(entity: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            identifier: identifier.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            source: anyhow::anyhow!(message.into()),
        }
    }
}
