//! Persistence bridge for the saved-question slot.
//!
//! The slot is a single JSON file holding an array of question ids. It is
//! the only state that survives a restart.

use std::path::PathBuf;

use crate::errors::AppError;

/// Owns the path to the durable slot and mirrors the saved-question set
/// into it.
pub struct SavedStore {
    path: PathBuf,
}

impl SavedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the saved-question ids from the slot. A missing file or a
    /// malformed payload yields the empty set; the startup path never fails
    /// on durable storage.
    pub async fn load(&self) -> Vec<String> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read saved-question slot {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed saved-question slot {:?}: {}",
                    self.path,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Mirror the current saved-question set into the slot. Failures are
    /// logged and otherwise ignored; the in-memory set stays authoritative.
    pub async fn persist(&self, ids: &[String]) {
        if let Err(e) = self.write(ids).await {
            tracing::warn!(
                "Failed to persist saved questions to {:?}: {}",
                self.path,
                e
            );
        }
    }

    async fn write(&self, ids: &[String]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
        let json = serde_json::to_string(ids)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
