//! JWT token utilities for authentication.
//!
//! Provides token issuance and verification for user sessions. Keys are built
//! once from configuration and shared through app state; nothing here reads
//! the environment per call.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// JWT claims carried by every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email the token was issued for
    pub email: String,
    /// Granted capabilities. Empty today; present so authorization can be
    /// layered on without reshaping the token contract.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Signature checked out but the token is past its expiry.
    Expired,
    /// Bad signature, malformed structure, or any other decode failure.
    Invalid,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Zero leeway keeps "expired" a sharp boundary instead of a window.
        validation.leeway = 0;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds,
        }
    }

    /// Issue a signed token for the given user.
    pub fn issue(&self, user_id: &str, email: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            capabilities: Vec::new(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal { source: e.into() })
    }

    /// Verify a compact token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utils() -> JwtUtils {
        JwtUtils::new("test-secret", 3600)
    }

    #[test]
    fn issued_tokens_round_trip_their_claims() {
        let jwt = utils();
        let token = jwt.issue("user-1", "ada@example.com").unwrap();

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.user_id(), "user-1");
        assert_eq!(claims.email, "ada@example.com");
        assert!(claims.capabilities.is_empty());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_tokens_are_reported_as_expired() {
        let jwt = utils();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user-1".to_string(),
            email: "ada@example.com".to_string(),
            capabilities: Vec::new(),
            exp: (now - 120) as usize,
            iat: (now - 240) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(jwt.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn garbage_and_tampered_tokens_are_invalid() {
        let jwt = utils();

        assert_eq!(jwt.verify("not-a-token"), Err(TokenError::Invalid));

        let token = jwt.issue("user-1", "ada@example.com").unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert_eq!(jwt.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn tokens_signed_with_another_secret_are_invalid() {
        let other = JwtUtils::new("other-secret", 3600);
        let token = other.issue("user-1", "ada@example.com").unwrap();

        assert_eq!(utils().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn capability_check_matches_exact_entries() {
        let claims = Claims {
            sub: "user-1".to_string(),
            email: "ada@example.com".to_string(),
            capabilities: vec!["products:write".to_string()],
            exp: 2,
            iat: 1,
        };

        assert!(claims.has_capability("products:write"));
        assert!(!claims.has_capability("products:admin"));
    }
}
