//! Access token signing and validation.
//!
//! Access tokens are short-lived HS256 JWTs; refresh tokens are opaque
//! UUIDs stored server-side as SHA-256 hashes.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use koinonia_config::AuthConfig;
use koinonia_model::{AuthError, Claims};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_token_ttl_secs: i64,
}

impl JwtKeys {
    pub fn new(auth: &AuthConfig) -> Self {
        let secret = auth.jwt_secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_token_ttl_secs: auth.access_token_ttl_secs,
        }
    }

    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl_secs
    }

    pub fn generate_access_token(
        &self,
        user_id: Uuid,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_token_ttl_secs);

        let claims = Claims {
            sub: user_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AuthError::InternalError)
    }

    pub fn validate_access_token(
        &self,
        token: &str,
    ) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AuthError::TokenExpired
                }
                _ => AuthError::TokenInvalid,
            })
    }
}

pub fn generate_refresh_token() -> String {
    Uuid::new_v4().to_string()
}

/// Refresh tokens are stored hashed; a database leak does not leak
/// usable tokens.
pub fn hash_refresh_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::new(&AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            access_token_ttl_secs: 900,
            refresh_token_ttl_days: 30,
        })
    }

    #[test]
    fn round_trip_access_token() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.generate_access_token(user_id).unwrap();

        let claims = keys.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_rejected() {
        let keys = keys();
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: (now - Duration::seconds(100)).timestamp(),
            iat: (now - Duration::seconds(1000)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        assert!(matches!(
            keys.validate_access_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn wrong_secret_rejected() {
        let keys = keys();
        let other = JwtKeys::new(&AuthConfig {
            jwt_secret: "different-secret".to_string(),
            access_token_ttl_secs: 900,
            refresh_token_ttl_days: 30,
        });
        let token = other.generate_access_token(Uuid::new_v4()).unwrap();

        assert!(matches!(
            keys.validate_access_token(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn refresh_token_hash_is_stable() {
        let token = generate_refresh_token();
        assert_eq!(hash_refresh_token(&token), hash_refresh_token(&token));
        assert_ne!(
            hash_refresh_token(&token),
            hash_refresh_token(&generate_refresh_token())
        );
    }
}
