//! Error types for qrdash

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status. Only the message is
    /// kept; callers never branch on the status code.
    #[error("{0}")]
    Api(String),

    #[error("Not logged in. Run 'qrdash login' first.")]
    NotAuthenticated,

    #[error("Invalid style '{0}' (expected square, rounded, circle or gapped)")]
    InvalidStyle(String),

    #[error("Invalid color '{0}' (expected #rgb or #rrggbb)")]
    InvalidColor(String),

    #[error("Invalid QR image: {0}")]
    InvalidImage(String),

    #[error("QR payload must not be empty")]
    EmptyPayload,

    #[error("QR encoding error: {0}")]
    QrEncode(#[from] qrcode::types::QrError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("QR code {0} not found")]
    QrNotFound(i64),

    #[error("Config file not found. Run 'qrdash init' first.")]
    ConfigNotFound,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
