//! QR creation form

use std::path::{Path, PathBuf};

use crate::client::ApiClient;
use crate::config::QrDefaults;
use crate::error::Result;
use crate::qr::{QrImage, QrRequest};
use crate::session::SessionStore;

pub const GENERATE_FAILED: &str = "Failed to generate QR code. Please try again.";
pub const SAVE_FAILED: &str = "Failed to save QR code. Please try again.";
const DOWNLOAD_NAME: &str = "qr-code.png";

#[derive(Debug, Clone)]
pub struct CreateQrView {
    /// URL and style options, sent unchanged by both generate and save
    pub request: QrRequest,
    pub qr_code: Option<QrImage>,
    pub error: Option<String>,
    pub loading: bool,
    pub saved: bool,
}

impl CreateQrView {
    pub fn new(defaults: &QrDefaults) -> Self {
        Self {
            request: defaults.request_for(""),
            qr_code: None,
            error: None,
            loading: false,
            saved: false,
        }
    }

    /// Render the current request without saving it
    pub async fn generate(&mut self, client: &ApiClient, session: &SessionStore) {
        self.begin();
        let result = client.create_qr(session, &self.request).await;
        self.finish(result, GENERATE_FAILED, false);
    }

    /// Render and persist the current request
    pub async fn save(&mut self, client: &ApiClient, session: &SessionStore) {
        self.begin();
        let result = client.save_qr(session, &self.request).await;
        self.finish(result, SAVE_FAILED, true);
    }

    fn begin(&mut self) {
        self.error = None;
        self.saved = false;
        self.loading = true;
    }

    fn finish(&mut self, result: Result<QrImage>, failure: &str, saving: bool) {
        self.loading = false;
        match result {
            Ok(image) => {
                self.qr_code = Some(image);
                self.saved = saving;
            }
            Err(e) => {
                tracing::debug!("QR request failed: {}", e);
                self.error = Some(failure.to_string());
            }
        }
    }

    /// Write the displayed image to `dir/qr-code.png`. None when nothing
    /// has been generated yet.
    pub fn download(&self, dir: &Path) -> Option<Result<PathBuf>> {
        self.qr_code
            .as_ref()
            .map(|image| image.save_to(dir, DOWNLOAD_NAME))
    }
}
