//! Accounts and bearer tokens for the reference server

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{Claims, JwtKeys};
pub use middleware::{bearer_token, AuthUser};
pub use models::User;
