//! Saved QR code list

use std::path::{Path, PathBuf};

use crate::client::ApiClient;
use crate::error::Result;
use crate::qr::QrRecord;
use crate::session::SessionStore;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this QR code?";

#[derive(Debug, Clone)]
pub struct ManageQrView {
    pub records: Vec<QrRecord>,
    pub error: Option<String>,
    /// True until the first fetch completes
    pub loading: bool,
}

impl Default for ManageQrView {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            error: None,
            loading: true,
        }
    }
}

impl ManageQrView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with the server's. On failure the list is kept.
    pub async fn load(&mut self, client: &ApiClient, session: &SessionStore) {
        match client.list_qr(session).await {
            Ok(records) => self.records = records,
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
    }

    /// Delete after confirmation, then refetch the whole list.
    /// Returns false when declined or when the delete failed.
    pub async fn delete(
        &mut self,
        client: &ApiClient,
        session: &SessionStore,
        id: i64,
        confirm: impl FnOnce(&str) -> bool,
    ) -> bool {
        if !confirm(DELETE_PROMPT) {
            return false;
        }

        match client.delete_qr(session, id).await {
            Ok(()) => {
                self.load(client, session).await;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn find(&self, id: i64) -> Option<&QrRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Write a record's image to `dir/qr-code-<encoded url>.png`
    pub fn download(&self, record: &QrRecord, dir: &Path) -> Result<PathBuf> {
        record.image().save_to(dir, &record.download_filename())
    }
}

/// Creation time in the local timezone
pub fn format_created(record: &QrRecord) -> String {
    record
        .created_at
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
