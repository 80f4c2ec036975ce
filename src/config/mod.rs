//! Configuration management for qrdash

pub mod loader;
mod schema;

pub use loader::{load_config, load_config_or_default};
pub use schema::*;
