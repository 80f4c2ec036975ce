//! Authentication models

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A registered account on the reference server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Username for login
    pub username: String,
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// When the account was created
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// Create a new user, hashing `password` with the given bcrypt cost
    pub fn new(username: String, email: String, password: &str, cost: u32) -> Result<Self> {
        let password_hash = bcrypt::hash(password, cost)
            .map_err(|e| Error::Other(format!("Failed to hash password: {}", e)))?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            created_at: chrono::Utc::now(),
        })
    }

    /// Check a login attempt against the stored hash
    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}
