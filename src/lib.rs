//! qrdash - create, save and manage styled QR codes
//!
//! The library exposes the API client and session context, the navigation
//! and view controllers driving the terminal front end, and a reference
//! implementation of the backend API.

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod nav;
pub mod qr;
pub mod session;

pub use client::ApiClient;
pub use config::Config;
pub use error::Error;
pub use session::{Session, SessionStore};
