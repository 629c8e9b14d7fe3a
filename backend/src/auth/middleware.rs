//! Middleware for protecting authenticated routes.
//!
//! This module validates bearer tokens on gated endpoints and resolves the
//! token subject to a stored user before the handler runs.

use axum::{
    Extension,
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::database::models::User;
use crate::errors::{AuthFailure, ServiceError};
use crate::state::AppState;
use crate::utils::jwt::{Claims, TokenError};

/// Authenticated caller, inserted into request extensions by [`jwt_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub claims: Claims,
}

/// JWT authentication middleware.
///
/// Checks run in a fixed order so every failure mode carries its own message:
/// store availability, header presence, header shape, token verification,
/// subject lookup.
pub async fn jwt_auth(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    if !state.users.is_available() {
        return Err(ServiceError::unavailable("Service temporarily unavailable"));
    }

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(ServiceError::unauthenticated(AuthFailure::MissingToken))?
        .to_str()
        .map_err(|_| ServiceError::unauthenticated(AuthFailure::MalformedHeader))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ServiceError::unauthenticated(AuthFailure::MalformedHeader))?;

    let claims = state.jwt.verify(token).map_err(|err| match err {
        TokenError::Expired => ServiceError::unauthenticated(AuthFailure::TokenExpired),
        TokenError::Invalid => ServiceError::unauthenticated(AuthFailure::TokenInvalid),
    })?;

    let user = state
        .users
        .find_by_id(&claims.sub)
        .await?
        .ok_or(ServiceError::unauthenticated(AuthFailure::UnknownUser))?;

    request.extensions_mut().insert(CurrentUser { user, claims });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router, middleware};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn whoami(Extension(current): Extension<CurrentUser>) -> Json<Value> {
        Json(json!({ "email": current.user.email }))
    }

    fn gated_router(state: AppState) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn(jwt_auth))
            .layer(Extension(state))
    }

    async fn send(router: Router, auth_header: Option<&str>) -> (StatusCode, Value) {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(value) = auth_header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = router
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler_with_the_current_user() {
        let state = test_support::app_state().await;
        let user = test_support::seed_user(&state, "gate@example.com").await;
        let token = state.jwt.issue(&user.id, &user.email).unwrap();

        let (status, body) =
            send(gated_router(state), Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "gate@example.com");
    }

    #[tokio::test]
    async fn each_rejection_reason_has_its_own_message() {
        let state = test_support::app_state().await;
        let user = test_support::seed_user(&state, "gate@example.com").await;

        let cases: Vec<(Option<String>, &str)> = vec![
            (None, "Token is missing"),
            (Some("Basic abc123".to_string()), "Invalid token format"),
            (Some("Bearer ".to_string()), "Invalid token format"),
            (Some("Bearer not-a-jwt".to_string()), "Token is invalid"),
            (
                Some(format!("Bearer {}", test_support::expired_token(&user))),
                "Token has expired",
            ),
        ];

        for (header, expected) in cases {
            let (status, body) = send(gated_router(state.clone()), header.as_deref()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "case: {expected}");
            assert_eq!(body["error"], expected);
        }
    }

    #[tokio::test]
    async fn token_for_a_deleted_user_is_rejected() {
        let state = test_support::app_state().await;
        let token = state.jwt.issue("ghost-user-id", "ghost@example.com").unwrap();

        let (status, body) =
            send(gated_router(state), Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn unavailable_store_short_circuits_with_503() {
        let state = test_support::offline_app_state();

        let (status, body) = send(gated_router(state), Some("Bearer anything")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Service temporarily unavailable");
    }
}
