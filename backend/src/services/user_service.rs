//! User business logic service.
//!
//! Handles registration, credential checks, and directory reads. Passwords
//! are hashed here and nowhere else; the hash never leaves this layer inside
//! a response type.

use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::{NewUser, User};
use crate::errors::{AuthFailure, ServiceError, ServiceResult};
use crate::repositories::UserStore;
use crate::utils::jwt::JwtUtils;
use crate::validation::{self, FullRegistrationFields};

/// Full-profile registration payload. Everything optional so validation can
/// report all missing fields at once.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Directory entry for a registered user. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ProfileView {
    /// Directory listing shape, including the active flag.
    pub fn directory(user: &User) -> Self {
        ProfileView {
            id: user.id.clone(),
            full_name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            created_at: user.created_at,
            is_active: Some(user.is_active),
        }
    }

    /// Creation response shape, without the active flag.
    pub fn created(user: &User) -> Self {
        ProfileView {
            is_active: None,
            ..Self::directory(user)
        }
    }
}

pub struct UserService<'a> {
    users: &'a dyn UserStore,
    jwt: &'a JwtUtils,
}

impl<'a> UserService<'a> {
    pub fn new(users: &'a dyn UserStore, jwt: &'a JwtUtils) -> Self {
        Self { users, jwt }
    }

    /// Creates a user from already-validated credential fields.
    ///
    /// The store's unique index turns a concurrent duplicate registration
    /// into a `Conflict`, so there is no read-then-insert race.
    pub async fn create_credential_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<User> {
        let password_hash = hash_password(password)?;
        let user = self
            .users
            .insert(NewUser::with_generated_id(
                name.trim().to_string(),
                validation::normalize_email(email),
                None,
                password_hash,
            ))
            .await?;
        Ok(user)
    }

    /// Full-profile registration: validates, stores a digits-only phone, and
    /// issues a session token for the new user.
    pub async fn create_full(&self, payload: &SignupPayload) -> ServiceResult<(String, User)> {
        let errors = validation::validate_full_registration(&FullRegistrationFields {
            full_name: payload.full_name.as_deref(),
            email: payload.email.as_deref(),
            phone: payload.phone.as_deref(),
            password: payload.password.as_deref(),
            confirm_password: payload.confirm_password.as_deref(),
        });
        if !errors.is_empty() {
            return Err(ServiceError::validation(errors));
        }

        let phone = validation::extract_digits(payload.phone.as_deref().unwrap_or_default());
        let password_hash = hash_password(payload.password.as_deref().unwrap_or_default().trim())?;

        let user = self
            .users
            .insert(NewUser::with_generated_id(
                payload.full_name.as_deref().unwrap_or_default().trim().to_string(),
                validation::normalize_email(payload.email.as_deref().unwrap_or_default()),
                Some(phone),
                password_hash,
            ))
            .await?;

        let token = self.jwt.issue(&user.id, &user.email)?;
        Ok((token, user))
    }

    /// Checks a credential pair against the store.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<User> {
        let user = self
            .users
            .find_by_email(&validation::normalize_email(email))
            .await?
            .ok_or_else(|| ServiceError::unauthenticated(AuthFailure::InvalidCredentials))?;

        if !verify_password(password.trim(), &user.password_hash)? {
            return Err(ServiceError::unauthenticated(
                AuthFailure::InvalidCredentials,
            ));
        }

        Ok(user)
    }

    /// Retrieves a user by ID with existence verification.
    pub async fn get_user(&self, id: &str) -> ServiceResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))
    }

    /// Every registered user, newest first.
    pub async fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.users.list_all().await?)
    }
}

/// Hashes a password before it is stored.
pub(crate) fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| ServiceError::Internal { source: e.into() })
}

/// Verifies a password against the stored hash.
pub(crate) fn verify_password(password: &str, password_hash: &str) -> ServiceResult<bool> {
    verify(password, password_hash).map_err(|e| ServiceError::Internal { source: e.into() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::repositories::UserRepository;
    use crate::utils::jwt::JwtUtils;

    async fn service_parts() -> (UserRepository, JwtUtils) {
        (
            UserRepository::new(test_pool().await),
            JwtUtils::new("test-secret", 3600),
        )
    }

    fn signup(phone: &str) -> SignupPayload {
        SignupPayload {
            full_name: Some("  Ada Lovelace  ".to_string()),
            email: Some("Ada@Example.com".to_string()),
            phone: Some(phone.to_string()),
            password: Some("secret1".to_string()),
            confirm_password: Some("secret1".to_string()),
        }
    }

    #[tokio::test]
    async fn full_registration_normalizes_and_issues_a_working_token() {
        let (repo, jwt) = service_parts().await;
        let service = UserService::new(&repo, &jwt);

        let (token, user) = service.create_full(&signup("(555) 123-4567")).await.unwrap();

        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.phone.as_deref(), Some("5551234567"));

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "ada@example.com");
    }

    #[tokio::test]
    async fn full_registration_rejects_bad_phone_numbers() {
        let (repo, jwt) = service_parts().await;
        let service = UserService::new(&repo, &jwt);

        let err = service.create_full(&signup("12345")).await.unwrap_err();
        match err {
            ServiceError::Validation { errors } => {
                assert_eq!(errors["phone"], "Phone must contain 10 to 15 digits only");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn authenticate_accepts_the_original_password_only() {
        let (repo, jwt) = service_parts().await;
        let service = UserService::new(&repo, &jwt);

        service
            .create_credential_user("Ada", "ada@example.com", "secret1")
            .await
            .unwrap();

        let user = service.authenticate("ADA@example.com", "secret1").await.unwrap();
        assert_eq!(user.email, "ada@example.com");

        let err = service
            .authenticate("ada@example.com", "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Unauthenticated {
                reason: AuthFailure::InvalidCredentials
            }
        ));

        let err = service
            .authenticate("ghost@example.com", "secret1")
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
    async fn duplicate_email_registration_conflicts_even_with_different_casing() {
        let (repo, jwt) = service_parts().await;
        let service = UserService::new(&repo, &jwt);

        service
            .create_credential_user("Ada", "ada@example.com", "secret1")
            .await
            .unwrap();
        let err = service
            .create_credential_user("Other", "ADA@EXAMPLE.COM", "secret2")
            .await
            .unwrap_err();

        match err {
            ServiceError::Conflict { field, message } => {
                assert_eq!(field, "email");
                assert_eq!(message, "Email already registered");
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_user_reports_not_found_for_unknown_ids() {
        let (repo, jwt) = service_parts().await;
        let service = UserService::new(&repo, &jwt);

        let err = service.get_user("no-such-id").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "User", .. }));
    }

    #[test]
    fn profile_views_never_expose_password_material() {
        let user = User {
            id: "user-1".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("5551234567".to_string()),
            password_hash: "$2b$12$secret".to_string(),
            is_active: true,
            created_at: Utc::now(),
        };

        let directory = serde_json::to_value(ProfileView::directory(&user)).unwrap();
        assert_eq!(directory["fullName"], "Ada Lovelace");
        assert_eq!(directory["isActive"], true);
        assert!(directory.get("password").is_none());
        assert!(directory.get("passwordHash").is_none());

        let created = serde_json::to_value(ProfileView::created(&user)).unwrap();
        assert!(created.get("isActive").is_none());
        assert_eq!(created["phone"], "5551234567");
    }
}
