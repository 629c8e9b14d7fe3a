//! Shared API plumbing: error rendering, pagination, and body helpers.
//!
//! Provides the conversion between service-layer errors and HTTP responses,
//! plus the pagination types used by list endpoints. Includes:
//! - Standard error response format
//! - ServiceError to HTTP status code mapping
//! - Pagination metadata with camelCase wire names
//! - Lenient query-parameter parsing (bad values fall back to defaults)
//!
//! # Response Format
//! All errors serialize to a consistent JSON body containing:
//! - `error`: human-readable message
//! - `errors`: optional field → message map for validation and conflicts
//! - `details`: internal error text, present only in development
//!
//! # Error Handling Flow
//! 1. Services return a domain `ServiceError`
//! 2. `impl IntoResponse for ServiceError` renders status + JSON body
//! 3. Internal detail is withheld unless the process runs in development

use std::sync::OnceLock;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::config::Environment;
use crate::errors::ServiceError;
use crate::repositories::{ProductListQuery, SortSpec};
use crate::validation::FieldErrors;

/// Default sort echoed back and applied when the client sends none.
pub const DEFAULT_SORT: &str = "-createdAt";

static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

/// Records the deployment environment for error rendering. Called once from
/// startup; later calls are ignored.
pub fn set_environment(environment: Environment) {
    let _ = ENVIRONMENT.set(environment);
}

/// Environment used when rendering errors. Defaults to production so detail
/// never leaks when startup order is wrong.
pub fn current_environment() -> Environment {
    ENVIRONMENT.get().copied().unwrap_or(Environment::Production)
}

/// Wire shape for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn message(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
            errors: None,
            details: None,
        }
    }
}

/// Pure mapping from a service error to status and body, parameterized on the
/// environment so tests can cover both leak modes.
pub fn error_body(error: &ServiceError, environment: Environment) -> (StatusCode, ErrorBody) {
    match error {
        ServiceError::Validation { errors } => (
            StatusCode::BAD_REQUEST,
            ErrorBody {
                error: "Validation failed".to_string(),
                errors: Some(errors.clone()),
                details: None,
            },
        ),
        ServiceError::Conflict { field, message } => {
            let mut errors = FieldErrors::new();
            errors.insert(field.clone(), message.clone());
            (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message.clone(),
                    errors: Some(errors),
                    details: None,
                },
            )
        }
        ServiceError::Unauthenticated { reason } => (
            StatusCode::UNAUTHORIZED,
            ErrorBody::message(reason.message()),
        ),
        ServiceError::NotFound { entity, .. } => (
            StatusCode::NOT_FOUND,
            ErrorBody::message(format!("{entity} not found")),
        ),
        ServiceError::Unavailable { message } => (
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorBody {
                error: "Service temporarily unavailable".to_string(),
                errors: None,
                details: environment
                    .is_development()
                    .then(|| message.clone()),
            },
        ),
        ServiceError::Internal { source } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody {
                error: "Internal server error".to_string(),
                errors: None,
                details: environment
                    .is_development()
                    .then(|| format!("{source:#}")),
            },
        ),
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            ServiceError::Internal { source } => {
                tracing::error!("internal error: {source:#}");
            }
            ServiceError::Unavailable { message } => {
                tracing::warn!("store unavailable: {message}");
            }
            _ => {}
        }
        let (status, body) = error_body(&self, current_environment());
        (status, Json(body)).into_response()
    }
}

/// JSON fallback for unknown routes.
pub async fn endpoint_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::message("Endpoint not found")),
    )
        .into_response()
}

/// Treats an absent or unreadable JSON body as an empty payload so the
/// validators report every missing field instead of a transport error.
pub fn json_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(value)) => value,
        Err(_) => T::default(),
    }
}

/// Pagination metadata for list responses
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (1-indexed)
    pub current_page: u32,
    /// Total number of pages; zero when there are no items
    pub total_pages: u32,
    /// Total number of items across all pages
    pub total_items: u64,
    /// Number of items per page
    pub items_per_page: u32,
    /// Whether there is a next page
    pub has_next: bool,
    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from page parameters and total count
    pub fn new(current_page: u32, items_per_page: u32, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            ((total_items + items_per_page as u64 - 1) / items_per_page as u64) as u32
        };

        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    pub fn from_filter(filter: &PaginationFilter, total_items: u64) -> Self {
        Self::new(filter.page(), filter.limit(), total_items)
    }
}

/// Pagination and filtering parameters for list requests.
///
/// Raw strings, parsed leniently: anything out of range or unparseable falls
/// back to the default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationFilter {
    /// Page number (1-indexed)
    pub page: Option<String>,
    /// Number of items per page
    pub limit: Option<String>,
    /// Sort field, optionally prefixed with `-` for descending
    pub sort: Option<String>,
    /// Case-insensitive keyword filter
    pub keyword: Option<String>,
}

impl PaginationFilter {
    /// Get page number with default
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }

    /// Get limit with default, capped to 1..=100
    pub fn limit(&self) -> u32 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|limit| (1..=100).contains(limit))
            .unwrap_or(10)
    }

    /// Calculate offset for database queries
    pub fn offset(&self) -> u32 {
        (self.page() - 1) * self.limit()
    }

    /// Effective sort, defaulting when absent or outside the whitelist.
    pub fn sort_spec(&self) -> SortSpec {
        self.sort
            .as_deref()
            .and_then(SortSpec::parse)
            .unwrap_or_default()
    }

    /// Sort string echoed back in the `filters` section of list responses.
    pub fn sort_echo(&self) -> &str {
        self.sort.as_deref().unwrap_or(DEFAULT_SORT)
    }

    /// Trimmed keyword; empty strings count as absent.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
    }

    /// Resolved query handed to the product store.
    pub fn to_product_query(&self) -> ProductListQuery {
        ProductListQuery {
            keyword: self.keyword().map(str::to_string),
            sort: self.sort_spec(),
            limit: self.limit(),
            offset: self.offset(),
        }
    }
}
