//! Key-value storage backends
//!
//! A [`Storage`] holds named slots of text. Reads and writes are
//! synchronous; a write replaces the slot's whole content.

use crate::app_name::AppName;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure of a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to create storage directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize storage group: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A persistent set of named text slots
pub trait Storage {
    /// Content of a slot, `None` if the slot was never written or was removed
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the content of a slot
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Clear a slot; clearing an absent slot is not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Storage that lives as long as the value, used in tests
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// Path of a group's file, `<group>.json` in the application's storage directory
pub fn get_group_path(app_name: &AppName, group: &str) -> PathBuf {
    app_name.storage_dir().join(format!("{group}.json"))
}

/// Storage backed by one JSON object file per group
///
/// The file is read once when opened and kept in memory; every write
/// rewrites the whole file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    slots: HashMap<String, String>,
}

impl FileStorage {
    /// Open the group file of an application
    pub fn open(app_name: &AppName, group: &str) -> Self {
        Self::open_path(get_group_path(app_name, group))
    }

    /// Open a group file at an explicit path
    ///
    /// A missing file opens as empty. An unreadable or malformed file also
    /// opens as empty and is replaced by the next write.
    ///
    /// # Errors
    ///
    /// Opening does not fail: load errors are logged and the group starts
    /// empty. Write errors surface from [`Storage::set`] and [`Storage::remove`].
    pub fn open_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slots = match load_group(&path) {
            Ok(slots) => slots,
            Err(err) => {
                warn!(%err, "ignoring unusable storage file");
                HashMap::new()
            }
        };
        debug!(path = %path.display(), slots = slots.len(), "opened storage");

        Self { path, slots }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `modifier` to a copy of the slots and keep the copy only once
    /// it has been written; a failed write leaves memory matching the disk.
    fn modify<F>(&mut self, modifier: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut HashMap<String, String>) -> bool,
    {
        let mut slots = self.slots.clone();
        if !modifier(&mut slots) {
            return Ok(());
        }

        save_group(&self.path, &slots)?;
        self.slots = slots;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.modify(|slots| {
            slots.insert(key.to_string(), value);
            true
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.modify(|slots| slots.remove(key).is_some())
    }
}

/// Read a group file; a missing or blank file is an empty group
fn load_group(path: &Path) -> Result<HashMap<String, String>, StorageError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let contents = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Ok(HashMap::new());
    }

    serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a group file as pretty-printed JSON, creating its directory first
fn save_group(path: &Path, data: &HashMap<String, String>) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let contents = serde_json::to_string_pretty(data).map_err(StorageError::Serialize)?;

    fs::write(path, contents).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}
