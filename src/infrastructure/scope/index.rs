//! Scope object index (`index.toml`)
//!
//! Maps every stored object to the hash of its record plus the commit log
//! it was stored with. Updates happen under an exclusive `fs2` lock.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::ports::{ScopeError, ScopeResult};

const INDEX_VERSION: u32 = 1;
const HASH_PREFIX: &str = "sha256:";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlIndex {
    version: u32,
    #[serde(default)]
    objects: BTreeMap<String, IndexEntry>,
}

impl Default for TomlIndex {
    fn default() -> Self {
        Self {
            version: INDEX_VERSION,
            objects: BTreeMap::new(),
        }
    }
}

/// `sha256:<hex>` of a stored record
pub fn object_hash(content: &str) -> String {
    format!("{}{:x}", HASH_PREFIX, Sha256::digest(content.as_bytes()))
}

pub struct ObjectIndex {
    path: PathBuf,
}

impl ObjectIndex {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn load_from_disk(&self) -> ScopeResult<TomlIndex> {
        if !self.path.exists() {
            return Ok(TomlIndex::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| ScopeError::AccessError {
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ScopeError::Corrupted {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn save_to_disk(&self, index: &TomlIndex) -> ScopeResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ScopeError::AccessError {
                message: e.to_string(),
            })?;
        }

        let content =
            toml::to_string_pretty(index).map_err(|e| ScopeError::SerializationError {
                message: e.to_string(),
            })?;

        fs::write(&self.path, content).map_err(|e| ScopeError::AccessError {
            message: e.to_string(),
        })
    }

    pub fn get(&self, key: &str) -> ScopeResult<Option<IndexEntry>> {
        Ok(self.load_from_disk()?.objects.remove(key))
    }

    /// Read-modify-write of one entry under the index lock
    ///
    /// `update` receives the previous entry, if any.
    pub fn update<F>(&self, key: &str, update: F) -> ScopeResult<()>
    where
        F: FnOnce(Option<IndexEntry>) -> IndexEntry,
    {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ScopeError::AccessError {
                message: e.to_string(),
            })?;
        }

        let lock_file = fs::File::create(&lock_path).map_err(|e| ScopeError::AccessError {
            message: e.to_string(),
        })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| ScopeError::AccessError {
                message: e.to_string(),
            })?;

        let result = self.load_from_disk().and_then(|mut index| {
            let previous = index.objects.remove(key);
            index.objects.insert(key.to_string(), update(previous));
            self.save_to_disk(&index)
        });

        let _ = lock_file.unlock();
        result
    }
}
