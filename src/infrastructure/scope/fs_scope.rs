//! Directory-backed scope
//!
//! ```text
//! <root>/
//!   index.toml                              # object hashes + commit logs
//!   objects/<box>/<name>/<version>.json     # component records
//!   environments/<box>/<name>/<version>/    # installed plugins (plugin.toml)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::{CommitLog, Component, SpecsResults};
use crate::domain::ports::{
    InstallRequest, LoadOptions, Plugin, Scope, ScopeError, ScopeResult, SourceRepository,
};
use crate::domain::value_objects::BitId;
use crate::infrastructure::fs::atomic_write;

use super::environment::EnvironmentPlugin;
use super::index::{object_hash, IndexEntry, ObjectIndex};

const OBJECTS_DIR: &str = "objects";
const ENVIRONMENTS_DIR: &str = "environments";
const INDEX_FILE: &str = "index.toml";

pub struct FsScope {
    root: PathBuf,
    name: String,
    environments_source: Option<PathBuf>,
    index: ObjectIndex,
}

impl FsScope {
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let root = root.into();
        let index = ObjectIndex::new(root.join(INDEX_FILE));
        Self {
            root,
            name: name.into(),
            environments_source: None,
            index,
        }
    }

    /// Directory that `install_environment` copies missing environments from
    pub fn with_environments_source(mut self, source: Option<PathBuf>) -> Self {
        self.environments_source = source;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_dir(&self, box_name: &str, name: &str) -> PathBuf {
        self.root.join(OBJECTS_DIR).join(box_name).join(name)
    }

    fn object_path(&self, box_name: &str, name: &str, version: u32) -> PathBuf {
        self.object_dir(box_name, name)
            .join(format!("{}.json", version))
    }

    fn installed_environment(&self, id: &BitId) -> Option<PathBuf> {
        resolve_versioned_dir(&self.root.join(ENVIRONMENTS_DIR), id)
    }

    fn environment_dir(&self, id: &BitId) -> ScopeResult<PathBuf> {
        self.installed_environment(id)
            .ok_or_else(|| ScopeError::EnvironmentNotFound { id: id.to_string() })
    }

    fn install_one(&self, id: &BitId) -> ScopeResult<()> {
        if self.installed_environment(id).is_some() {
            return Ok(());
        }

        let source = self
            .environments_source
            .as_deref()
            .and_then(|source| resolve_versioned_dir(source, id))
            .ok_or_else(|| ScopeError::EnvironmentNotFound { id: id.to_string() })?;

        let version = source
            .file_name()
            .map(|v| v.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target = self
            .root
            .join(ENVIRONMENTS_DIR)
            .join(id.box_name())
            .join(id.name())
            .join(version);

        copy_dir_all(&source, &target).map_err(|e| ScopeError::AccessError {
            message: format!("failed to install {}: {}", id, e),
        })
    }

    fn store(&self, component: &Component, log: Option<&CommitLog>) -> ScopeResult<()> {
        let version = component
            .version()
            .ok_or_else(|| ScopeError::SerializationError {
                message: format!("component '{}' has no version", component.display_name()),
            })?;

        let json = component
            .to_json()
            .map_err(|e| ScopeError::SerializationError {
                message: e.to_string(),
            })?;

        let path = self.object_path(component.box_name(), component.name(), version);
        let replaced = fs::read(&path).ok();
        atomic_write(&path, json.as_bytes()).map_err(|e| ScopeError::AccessError {
            message: e.to_string(),
        })?;

        let hash = object_hash(&json);
        let key = object_key(component.box_name(), component.name(), version);
        let indexed = self.index.update(&key, |previous| {
            let previous = previous.unwrap_or(IndexEntry {
                hash: String::new(),
                message: None,
                date: None,
            });
            IndexEntry {
                hash,
                message: log.map(|l| l.message.clone()).or(previous.message),
                date: log.map(|l| l.date).or(previous.date),
            }
        });

        match indexed {
            Err(e) => match restore_object(&path, replaced.as_deref()) {
                Ok(()) => Err(e),
                Err(rollback) => Err(ScopeError::AccessError {
                    message: format!("{e}; rolling back {} also failed: {rollback}", path.display()),
                }),
            },
            ok => ok,
        }
    }

    /// Commit log stored for a version, if any
    pub fn log(&self, box_name: &str, name: &str, version: u32) -> ScopeResult<Option<CommitLog>> {
        let entry = self.index.get(&object_key(box_name, name, version))?;
        Ok(entry.and_then(|entry| match (entry.message, entry.date) {
            (Some(message), Some(date)) => Some(CommitLog::new(message).with_date(date)),
            _ => None,
        }))
    }
}

/// Put back the object an unindexed write replaced, or drop the new one
fn restore_object(path: &Path, previous: Option<&[u8]>) -> Result<(), String> {
    match previous {
        Some(content) => atomic_write(path, content).map_err(|e| e.to_string()),
        None => fs::remove_file(path).map_err(|e| e.to_string()),
    }
}

fn object_key(box_name: &str, name: &str, version: u32) -> String {
    format!("{}/{}@{}", box_name, name, version)
}

/// `<base>/<box>/<name>/<version>`; a versionless id picks the highest numeric version
fn resolve_versioned_dir(base: &Path, id: &BitId) -> Option<PathBuf> {
    let dir = base.join(id.box_name()).join(id.name());
    let resolved = match id.version() {
        Some(version) => dir.join(version),
        None => {
            let latest = fs::read_dir(&dir)
                .ok()?
                .filter_map(Result::ok)
                .filter(|entry| entry.path().is_dir())
                .filter_map(|entry| entry.file_name().to_str()?.parse::<u32>().ok())
                .max()?;
            dir.join(latest.to_string())
        }
    };
    resolved.is_dir().then_some(resolved)
}

fn copy_dir_all(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

impl Scope for FsScope {
    fn name(&self) -> &str {
        &self.name
    }

    fn install_environment(&self, request: &InstallRequest<'_>) -> ScopeResult<()> {
        for id in request.ids {
            self.install_one(id)?;
        }
        Ok(())
    }

    fn load_plugin(&self, id: &BitId, _options: LoadOptions) -> ScopeResult<Box<dyn Plugin>> {
        let dir = self.environment_dir(id)?;
        Ok(Box::new(EnvironmentPlugin::load(&id.to_string(), &dir)?))
    }

    fn load_tester_path(&self, id: &BitId, _options: LoadOptions) -> ScopeResult<PathBuf> {
        let dir = self.environment_dir(id)?;
        EnvironmentPlugin::load(&id.to_string(), &dir)?
            .entry_path()
            .ok_or_else(|| ScopeError::InvalidPlugin {
                id: id.to_string(),
                message: "manifest has no `entry`".to_string(),
            })
    }

    fn sources(&self) -> &dyn SourceRepository {
        self
    }
}

impl SourceRepository for FsScope {
    fn update_dist(&self, source: &Component) -> ScopeResult<()> {
        self.store(source, None)
    }

    fn modify_specs_results(
        &self,
        source: &Component,
        specs_results: &SpecsResults,
    ) -> ScopeResult<()> {
        let updated = source
            .clone()
            .with_specs_results(Some(specs_results.clone()));
        self.store(&updated, None)
    }

    fn put(&self, source: &Component, log: &CommitLog) -> ScopeResult<()> {
        self.store(source, Some(log))
    }

    fn get(&self, id: &BitId) -> ScopeResult<Component> {
        let not_found = || ScopeError::ComponentNotFound { id: id.to_string() };

        let version = match id.version() {
            Some(version) => version.parse::<u32>().map_err(|_| not_found())?,
            None => self
                .latest_version(id.box_name(), id.name())?
                .ok_or_else(not_found)?,
        };

        let path = self.object_path(id.box_name(), id.name(), version);
        if !path.exists() {
            return Err(not_found());
        }

        let content = fs::read_to_string(&path).map_err(|e| ScopeError::AccessError {
            message: e.to_string(),
        })?;

        let entry = self
            .index
            .get(&object_key(id.box_name(), id.name(), version))?
            .ok_or_else(|| ScopeError::Corrupted {
                path: path.clone(),
                message: "object is missing from the index".to_string(),
            })?;
        if entry.hash != object_hash(&content) {
            return Err(ScopeError::Corrupted {
                path,
                message: format!("hash mismatch (expected {})", entry.hash),
            });
        }

        Component::from_json(&content).map_err(|e| ScopeError::Corrupted {
            path,
            message: e.to_string(),
        })
    }

    fn latest_version(&self, box_name: &str, name: &str) -> ScopeResult<Option<u32>> {
        let dir = self.object_dir(box_name, name);
        if !dir.exists() {
            return Ok(None);
        }

        let entries = fs::read_dir(&dir).map_err(|e| ScopeError::AccessError {
            message: e.to_string(),
        })?;

        Ok(entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem()?.to_str()?.parse::<u32>().ok())
            .max())
    }
}
