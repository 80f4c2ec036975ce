//! QR code requests, records and image payloads

pub mod render;
mod style;

pub use render::{render_png, RenderOptions};
pub use style::*;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Body of `POST /api/qr/create` and `POST /api/qr/save`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrRequest {
    pub url: String,
    #[serde(default)]
    pub dot_style: QrStyle,
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
    #[serde(default = "default_back_color")]
    pub back_color: String,
    #[serde(default)]
    pub eye_style: QrStyle,
}

pub fn default_fill_color() -> String {
    "#000000".to_string()
}

pub fn default_back_color() -> String {
    "#ffffff".to_string()
}

impl QrRequest {
    /// Request with default styling
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            dot_style: QrStyle::default(),
            fill_color: default_fill_color(),
            back_color: default_back_color(),
            eye_style: QrStyle::default(),
        }
    }
}

/// A saved QR code as listed by `GET /api/qr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrRecord {
    pub id: i64,
    pub url: String,
    /// Bare base64 PNG
    pub qr_image: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl QrRecord {
    pub fn image(&self) -> QrImage {
        QrImage::from_payload(&self.qr_image)
    }

    /// File name used when downloading this record
    pub fn download_filename(&self) -> String {
        format!("qr-code-{}.png", urlencoding::encode(&self.url))
    }
}

/// Response body of the create/save endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeResponse {
    pub qr_code: String,
}

/// A rendered QR image, always held as a PNG data URI.
///
/// The backend may answer with either a bare base64 string or a full data
/// URI; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    data_uri: String,
}

impl QrImage {
    pub fn from_payload(payload: &str) -> Self {
        let payload = payload.trim();
        let data_uri = if payload.starts_with("data:") {
            payload.to_string()
        } else {
            format!("{}{}", PNG_DATA_URI_PREFIX, payload)
        };
        Self { data_uri }
    }

    pub fn from_png(bytes: &[u8]) -> Self {
        Self {
            data_uri: format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(bytes)),
        }
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// The base64 part of the data URI
    pub fn base64(&self) -> &str {
        self.data_uri
            .split_once(',')
            .map(|(_, data)| data)
            .unwrap_or(&self.data_uri)
    }

    /// Decode to raw PNG bytes
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        let (header, data) = self
            .data_uri
            .split_once(',')
            .ok_or_else(|| Error::InvalidImage("missing data URI separator".to_string()))?;
        if !header.ends_with(";base64") {
            return Err(Error::InvalidImage(format!(
                "unsupported data URI encoding: {}",
                header
            )));
        }
        STANDARD
            .decode(data)
            .map_err(|e| Error::InvalidImage(e.to_string()))
    }

    /// Write the decoded PNG into `dir/file_name`, returning the full path
    pub fn save_to(
        &self,
        dir: &std::path::Path,
        file_name: &str,
    ) -> Result<std::path::PathBuf> {
        let bytes = self.png_bytes()?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}
