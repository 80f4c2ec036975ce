//! Reference HTTP backend for the QR service API

pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod server;
pub mod store;

pub use server::*;
