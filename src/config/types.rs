//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BitResult;

use super::loader::{self, ConfigWarning};

/// Directory holding project-level tool state
pub const CONFIG_DIRNAME: &str = ".bitpm";
const DEFAULT_SCOPE_DIRNAME: &str = "scope";
const DEFAULT_SCOPE_NAME: &str = "local";

/// Scope configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScopeConfig {
    /// Scope root (defaults to `<project>/.bitpm/scope`)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Name used in committed ids (defaults to the project directory name)
    #[serde(default)]
    pub name: Option<String>,
}

/// Where missing plugin environments are installed from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EnvironmentsConfig {
    #[serde(default)]
    pub source: Option<PathBuf>,
}

/// Specs runner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    /// Interpreter testers are launched through, e.g. `node`
    #[serde(default)]
    pub command: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn is_verbose(self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::Debug)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scope: ScopeConfig,

    #[serde(default)]
    pub environments: EnvironmentsConfig,

    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BitResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BitResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (BITPM_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Scope root; relative paths are resolved against `project_root`
    pub fn scope_path(&self, project_root: &Path) -> PathBuf {
        match &self.scope.path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => project_root.join(path),
            None => project_root
                .join(CONFIG_DIRNAME)
                .join(DEFAULT_SCOPE_DIRNAME),
        }
    }

    /// Configured scope name, else the project directory name with
    /// characters outside `[A-Za-z0-9_.-]` replaced by `-`
    pub fn scope_name(&self, project_root: &Path) -> String {
        if let Some(name) = &self.scope.name {
            return name.clone();
        }
        project_root
            .file_name()
            .map(|n| sanitize_scope_name(&n.to_string_lossy()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_SCOPE_NAME.to_string())
    }
}

fn sanitize_scope_name(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
