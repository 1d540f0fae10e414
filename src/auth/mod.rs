use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod avatar;
pub mod password;

/// Session token payload: `{ "user": { "id": ... }, "iat": ..., "exp": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: ClaimsUser,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimsUser {
    pub id: Uuid,
}

impl Claims {
    pub fn new(user_id: Uuid, expires_in_secs: i64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::seconds(expires_in_secs)).timestamp();

        Self {
            user: ClaimsUser { id: user_id },
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    Generation(jsonwebtoken::errors::Error),

    #[error("Invalid JWT token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Signs and verifies session tokens with a shared HS256 secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_in_secs: i64,
}

impl TokenKeys {
    pub fn new(secret: &str, expires_in_secs: i64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expires_in_secs,
        })
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let claims = Claims::new(user_id, self.expires_in_secs);
        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Generation)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}
