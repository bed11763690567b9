//! Persisted version record.
//!
//! Tracks the last version the user has seen and the release notes of the
//! most recently downloaded update. Every setter writes through to disk
//! (`<data_dir>/liftoff/<app_id>/update-state.json`) using an atomic
//! temp-file-then-rename write.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionRecord {
    /// Version the user last ran (semantic version string)
    pub last_seen_version: Option<String>,
    /// Plain-text release notes of the last downloaded update
    pub last_release_notes: Option<String>,
}

/// Errors writing the record
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot write update state to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize update state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write-through key-value store for the version record
#[derive(Debug)]
pub struct VersionStore {
    /// Backing file; `None` keeps the record in memory only
    path: Option<PathBuf>,
    record: VersionRecord,
}

impl VersionStore {
    /// Open the store at `path`. A missing or unreadable file yields an empty record.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                log::warn!(
                    "Ignoring unreadable update state at {}: {}",
                    path.display(),
                    e
                );
                VersionRecord::default()
            }),
            Err(_) => VersionRecord::default(),
        };
        Self {
            path: Some(path),
            record,
        }
    }

    /// A store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            path: None,
            record: VersionRecord::default(),
        }
    }

    /// Backing file path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Snapshot of the current record
    pub fn record(&self) -> &VersionRecord {
        &self.record
    }

    pub fn last_seen_version(&self) -> Option<&str> {
        self.record.last_seen_version.as_deref()
    }

    pub fn last_release_notes(&self) -> Option<&str> {
        self.record.last_release_notes.as_deref()
    }

    pub fn set_last_seen_version(&mut self, version: impl Into<String>) -> Result<(), StoreError> {
        self.record.last_seen_version = Some(version.into());
        self.save()
    }

    pub fn set_last_release_notes(&mut self, notes: impl Into<String>) -> Result<(), StoreError> {
        self.record.last_release_notes = Some(notes.into());
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&self.record)?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(io_err)?;
        fs::rename(&temp_path, path).map_err(io_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = VersionStore::open(dir.path().join("update-state.json"));
        assert_eq!(store.record(), &VersionRecord::default());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app").join("update-state.json");

        let mut store = VersionStore::open(&path);
        store.set_last_seen_version("1.2.0").unwrap();
        store.set_last_release_notes("Fixed things").unwrap();
        drop(store);

        let reopened = VersionStore::open(&path);
        assert_eq!(reopened.last_seen_version(), Some("1.2.0"));
        assert_eq!(reopened.last_release_notes(), Some("Fixed things"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("update-state.json");
        fs::write(&path, "{not json").unwrap();

        let store = VersionStore::open(&path);
        assert!(store.last_seen_version().is_none());
    }

    #[test]
    fn test_partial_record_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("update-state.json");
        fs::write(&path, r#"{"last_seen_version":"0.9.0"}"#).unwrap();

        let store = VersionStore::open(&path);
        assert_eq!(store.last_seen_version(), Some("0.9.0"));
        assert!(store.last_release_notes().is_none());
    }

    #[test]
    fn test_in_memory_store_has_no_path() {
        let mut store = VersionStore::in_memory();
        store.set_last_seen_version("1.0.0").unwrap();
        assert!(store.path().is_none());
        assert_eq!(store.last_seen_version(), Some("1.0.0"));
    }
}
