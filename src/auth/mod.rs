use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::MAX_JWT_EXPIRY_HOURS;
use crate::database::models::User;

pub const TOKEN_ISSUER: &str = "report-api-rust";

/// The authenticated identity making the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

impl Claims {
    pub fn new(user_id: Uuid, username: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let hours = expiry_hours.min(MAX_JWT_EXPIRY_HOURS) as i64;
        let exp = (now + Duration::hours(hours)).timestamp();

        Self {
            sub: user_id,
            username: username.into(),
            exp,
            iat: now.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature, expiry and issuer, returning the decoded claims
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.set_issuer(&[TOKEN_ISSUER]);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

pub fn hash_password(plain: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plain, cost)
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(plain, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn jwt_round_trip_preserves_subject() {
        let user_id = Uuid::new_v4();
        let token = generate_jwt(&Claims::new(user_id, "alice", 1), SECRET).unwrap();
        let claims = validate_jwt(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iss, TOKEN_ISSUER);
    }

    #[test]
    fn jwt_rejects_wrong_secret() {
        let token = generate_jwt(&Claims::new(Uuid::new_v4(), "alice", 1), SECRET).unwrap();
        assert!(matches!(
            validate_jwt(&token, "other-secret"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn jwt_rejects_expired_token() {
        let mut claims = Claims::new(Uuid::new_v4(), "alice", 1);
        claims.exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = generate_jwt(&claims, SECRET).unwrap();
        assert!(validate_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn huge_expiry_is_clamped_not_wrapped() {
        let claims = Claims::new(Uuid::new_v4(), "alice", u64::MAX);
        let max = (Utc::now() + Duration::hours(MAX_JWT_EXPIRY_HOURS as i64)).timestamp();
        assert!(claims.exp > claims.iat);
        assert!(claims.exp <= max);

        let token = generate_jwt(&claims, SECRET).unwrap();
        assert!(validate_jwt(&token, SECRET).is_ok());
    }

    #[test]
    fn empty_secret_is_refused() {
        let claims = Claims::new(Uuid::new_v4(), "alice", 1);
        assert!(matches!(generate_jwt(&claims, ""), Err(JwtError::InvalidSecret)));
        assert!(matches!(validate_jwt("x.y.z", ""), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("pass", 4).unwrap();
        assert_ne!(hash, "pass");
        assert!(verify_password("pass", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }
}
