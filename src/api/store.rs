//! Users and saved QR codes of the reference server
//!
//! Everything lives in memory. With a data file configured the whole store
//! is loaded on start and rewritten after every mutation; a mutation only
//! takes effect in memory once that write succeeded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::User;
use crate::error::{Error, Result};
use crate::qr::{QrRecord, QrRequest};

/// A saved QR code with its owner and the style it was rendered with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQr {
    pub id: i64,
    pub owner_id: String,
    pub request: QrRequest,
    /// Bare base64 PNG
    pub qr_image: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&StoredQr> for QrRecord {
    fn from(stored: &StoredQr) -> Self {
        QrRecord {
            id: stored.id,
            url: stored.request.url.clone(),
            qr_image: stored.qr_image.clone(),
            created_at: stored.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    users: HashMap<String, User>,
    qr_codes: Vec<StoredQr>,
    next_id: i64,
}

#[derive(Debug, Default)]
pub struct Store {
    data: Snapshot,
    path: Option<PathBuf>,
}

impl Store {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed store, starting empty if the file does not exist
    pub fn open(path: &Path) -> Result<Self> {
        let data = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Snapshot::default()
        };
        tracing::info!(
            "Loaded {} users and {} QR codes from {}",
            data.users.len(),
            data.qr_codes.len(),
            path.display()
        );
        Ok(Self {
            data,
            path: Some(path.to_path_buf()),
        })
    }

    /// Apply `change` to the store. File-backed stores apply it to a copy,
    /// write the copy and only then swap it in.
    fn update<T>(&mut self, change: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
        let Some(path) = &self.path else {
            return change(&mut self.data);
        };

        let mut next = self.data.clone();
        let out = change(&mut next)?;
        write_snapshot(path, &next)?;
        self.data = next;
        Ok(out)
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.data.users.get(username)
    }

    /// Register a user. Returns false when the username is taken.
    pub fn insert_user(&mut self, user: User) -> Result<bool> {
        if self.data.users.contains_key(&user.username) {
            return Ok(false);
        }
        self.update(|data| {
            data.users.insert(user.username.clone(), user);
            Ok(true)
        })
    }

    pub fn user_count(&self) -> usize {
        self.data.users.len()
    }

    /// Save a rendered QR code for `owner_id`
    pub fn save_qr(&mut self, owner_id: &str, request: QrRequest, qr_image: String) -> Result<QrRecord> {
        self.update(|data| {
            data.next_id += 1;
            let stored = StoredQr {
                id: data.next_id,
                owner_id: owner_id.to_string(),
                request,
                qr_image,
                created_at: chrono::Utc::now(),
            };
            let record = QrRecord::from(&stored);
            data.qr_codes.push(stored);
            Ok(record)
        })
    }

    /// The owner's QR codes, newest first
    pub fn list_qr(&self, owner_id: &str) -> Vec<QrRecord> {
        let mut records: Vec<QrRecord> = self
            .data
            .qr_codes
            .iter()
            .filter(|qr| qr.owner_id == owner_id)
            .map(QrRecord::from)
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        records
    }

    /// Delete one of the owner's QR codes. Other owners' ids are reported
    /// as missing.
    pub fn delete_qr(&mut self, owner_id: &str, id: i64) -> Result<()> {
        self.update(|data| {
            let position = data
                .qr_codes
                .iter()
                .position(|qr| qr.id == id && qr.owner_id == owner_id)
                .ok_or(Error::QrNotFound(id))?;
            data.qr_codes.remove(position);
            Ok(())
        })
    }
}

fn write_snapshot(path: &Path, data: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(data)?)?;
    Ok(())
}
