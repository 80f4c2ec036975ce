//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::qr::{QrRequest, QrStyle, RenderOptions};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub qr: QrDefaults,
}

/// Settings used by the API client and CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Where the session token is stored. Defaults to the platform data dir.
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    /// Per-request timeout. Requests never time out when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api_base() -> String {
    "http://localhost:8000/api".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            session_file: None,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Resolve the session file location
    pub fn session_path(&self) -> PathBuf {
        if let Some(path) = &self.session_file {
            return path.clone();
        }
        directories::ProjectDirs::from("dev", "qrdash", "qrdash")
            .map(|dirs| dirs.data_dir().join("session.json"))
            .unwrap_or_else(|| PathBuf::from(".qrdash-session.json"))
    }
}

/// Reference backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// HS256 signing secret. A random secret is generated per start when
    /// unset, which invalidates tokens across restarts.
    #[serde(default)]
    pub jwt_secret: Option<String>,

    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,

    /// bcrypt work factor for stored passwords
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,

    /// JSON file holding users and saved QR codes. In-memory only when unset.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_token_ttl_minutes() -> i64 {
    60
}

fn default_password_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            jwt_secret: None,
            token_ttl_minutes: default_token_ttl_minutes(),
            password_cost: default_password_cost(),
            data_file: None,
        }
    }
}

/// Default style for new QR codes and render geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrDefaults {
    #[serde(default)]
    pub dot_style: QrStyle,

    #[serde(default)]
    pub eye_style: QrStyle,

    #[serde(default = "crate::qr::default_fill_color")]
    pub fill_color: String,

    #[serde(default = "crate::qr::default_back_color")]
    pub back_color: String,

    #[serde(default)]
    pub render: RenderOptions,
}

impl Default for QrDefaults {
    fn default() -> Self {
        Self {
            dot_style: QrStyle::default(),
            eye_style: QrStyle::default(),
            fill_color: crate::qr::default_fill_color(),
            back_color: crate::qr::default_back_color(),
            render: RenderOptions::default(),
        }
    }
}

impl QrDefaults {
    /// Build a request for `url` with these defaults applied
    pub fn request_for(&self, url: impl Into<String>) -> QrRequest {
        QrRequest {
            url: url.into(),
            dot_style: self.dot_style,
            fill_color: self.fill_color.clone(),
            back_color: self.back_color.clone(),
            eye_style: self.eye_style,
        }
    }
}
