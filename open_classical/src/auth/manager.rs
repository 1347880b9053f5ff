//! Authentication manager implementation.

use jsonwebtoken::{DecodingKey, Validation, decode};

use super::{
    errors::AuthResult,
    models::AccessTokenClaims,
};

/// Authentication manager
///
/// Tokens are minted by the identity provider; this manager only checks
/// signatures and expiry with the shared secret.
#[derive(Clone)]
pub struct AuthManager {
    jwt_secret: String,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Arguments
    ///
    /// * `jwt_secret` - Secret key shared with the identity provider
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    /// Verify an access token
    ///
    /// # Arguments
    ///
    /// * `token` - JWT access token
    ///
    /// # Returns
    ///
    /// * `AuthResult<AccessTokenClaims>` - Decoded claims or error
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        let token_data = decode::<AccessTokenClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    use super::*;

    fn make_token(secret: &str, expires_in: Duration, email: Option<&str>) -> String {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: Uuid::new_v4(),
            username: "alice".to_string(),
            email: email.map(str::to_string),
            exp: (now + expires_in).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_access_token_round_trip() {
        let manager = AuthManager::new("test-secret-at-least-32-chars-long".to_string());
        let token = make_token(
            "test-secret-at-least-32-chars-long",
            Duration::minutes(15),
            Some("alice@example.com"),
        );

        let claims = manager.verify_access_token(&token).unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_verify_access_token_rejects_wrong_secret() {
        let manager = AuthManager::new("test-secret-at-least-32-chars-long".to_string());
        let token = make_token("another-secret-entirely-wrong-one", Duration::minutes(15), None);

        assert!(manager.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_verify_access_token_rejects_expired() {
        let manager = AuthManager::new("test-secret-at-least-32-chars-long".to_string());
        let token = make_token(
            "test-secret-at-least-32-chars-long",
            Duration::minutes(-5),
            None,
        );

        assert!(manager.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_verify_access_token_rejects_garbage() {
        let manager = AuthManager::new("test-secret-at-least-32-chars-long".to_string());
        assert!(manager.verify_access_token("not-a-jwt").is_err());
    }
}
