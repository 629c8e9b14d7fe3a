//! Core business logic for the authentication system.

use crate::auth::models::{LoginPayload, RegisterPayload};
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::UserStore;
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use crate::validation::{self, CredentialFields, RegistrationFields};

/// Registration and login flows. Account bookkeeping lives in
/// [`UserService`]; this layer validates payloads and mints tokens.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    jwt: &'a JwtUtils,
}

impl<'a> AuthService<'a> {
    pub fn new(users: &'a dyn UserStore, jwt: &'a JwtUtils) -> Self {
        Self { users, jwt }
    }

    fn user_service(&self) -> UserService<'a> {
        UserService::new(self.users, self.jwt)
    }

    /// Registers a credential-only account and signs the first token.
    pub async fn register(&self, payload: &RegisterPayload) -> ServiceResult<(String, User)> {
        let errors = validation::validate_registration(&RegistrationFields {
            name: payload.name.as_deref(),
            email: payload.email.as_deref(),
            password: payload.password.as_deref(),
        });
        if !errors.is_empty() {
            return Err(ServiceError::validation(errors));
        }

        let user = self
            .user_service()
            .create_credential_user(
                payload.name.as_deref().unwrap_or_default(),
                payload.email.as_deref().unwrap_or_default(),
                payload.password.as_deref().unwrap_or_default().trim(),
            )
            .await?;

        let token = self.jwt.issue(&user.id, &user.email)?;
        Ok((token, user))
    }

    /// Exchanges a credential pair for a token.
    pub async fn login(&self, payload: &LoginPayload) -> ServiceResult<(String, User)> {
        let errors = validation::validate_credentials(&CredentialFields {
            email: payload.email.as_deref(),
            password: payload.password.as_deref(),
        });
        if !errors.is_empty() {
            return Err(ServiceError::validation(errors));
        }

        let user = self
            .user_service()
            .authenticate(
                payload.email.as_deref().unwrap_or_default(),
                payload.password.as_deref().unwrap_or_default().trim(),
            )
            .await?;

        let token = self.jwt.issue(&user.id, &user.email)?;
        Ok((token, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::errors::AuthFailure;
    use crate::repositories::UserRepository;

    fn jwt() -> JwtUtils {
        JwtUtils::new("auth-service-secret", 3600)
    }

    fn register_payload(email: &str) -> RegisterPayload {
        RegisterPayload {
            name: Some("Ada Lovelace".to_string()),
            email: Some(email.to_string()),
            password: Some("s3curePass".to_string()),
        }
    }

    #[tokio::test]
    async fn register_then_login_roundtrip() {
        let repo = UserRepository::new(test_pool().await);
        let jwt = jwt();
        let service = AuthService::new(&repo, &jwt);

        let (token, user) = service
            .register(&register_payload("Ada@Example.COM "))
            .await
            .unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(jwt.verify(&token).unwrap().sub, user.id);

        let (_, logged_in) = service
            .login(&LoginPayload {
                email: Some("  ADA@example.com".to_string()),
                password: Some("s3curePass".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn register_rejects_missing_fields_with_messages() {
        let repo = UserRepository::new(test_pool().await);
        let jwt = jwt();
        let service = AuthService::new(&repo, &jwt);

        let err = service.register(&RegisterPayload::default()).await.unwrap_err();
        match err {
            ServiceError::Validation { errors } => {
                assert_eq!(errors["name"], "Name is required");
                assert_eq!(errors["email"], "Email is required");
                assert_eq!(errors["password"], "Password is required");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() {
        let repo = UserRepository::new(test_pool().await);
        let jwt = jwt();
        let service = AuthService::new(&repo, &jwt);

        service
            .register(&register_payload("ada@example.com"))
            .await
            .unwrap();

        let err = service
            .login(&LoginPayload {
                email: Some("ada@example.com".to_string()),
                password: Some("wrong-password".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Unauthenticated {
                reason: AuthFailure::InvalidCredentials
            }
        ));
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_conflict() {
        let repo = UserRepository::new(test_pool().await);
        let jwt = jwt();
        let service = AuthService::new(&repo, &jwt);

        service
            .register(&register_payload("ada@example.com"))
            .await
            .unwrap();
        let err = service
            .register(&register_payload("ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict { ref field, .. } if field == "email"));
    }
}
