//! JWT token handling

use crate::auth::models::User;
use crate::error::{Error, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Create claims from user, valid for `ttl_minutes`
    pub fn from_user(user: &User, ttl_minutes: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user.id.clone(),
            username: user.username.clone(),
            iat: now,
            exp: now + ttl_minutes * 60,
        }
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() > self.exp
    }
}

/// HS256 signing and verification keys
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl JwtKeys {
    pub fn new(secret: &[u8], ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_minutes,
        }
    }

    /// Keys from a configured secret, or a fresh random one
    pub fn from_config(secret: Option<&str>, ttl_minutes: i64) -> Self {
        match secret {
            Some(secret) => Self::new(secret.as_bytes(), ttl_minutes),
            None => {
                tracing::warn!("No jwt_secret configured, tokens will not survive a restart");
                let random = format!("{}{}", uuid::Uuid::new_v4(), uuid::Uuid::new_v4());
                Self::new(random.as_bytes(), ttl_minutes)
            }
        }
    }

    /// Create a JWT token
    pub fn create_token(&self, user: &User) -> Result<String> {
        let claims = Claims::from_user(user, self.ttl_minutes);
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Config(format!("Failed to create token: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| Error::Api(format!("Invalid token: {}", e)))
    }
}
