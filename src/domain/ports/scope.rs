//! Scope port - the object store that holds components and resolves plugins
//!
//! Orchestration code only talks to the scope through these traits; the
//! directory-backed implementation lives in `infrastructure::scope`.

use std::path::PathBuf;

use crate::consumer::Consumer;
use crate::domain::entities::{CommitLog, Component, SpecsResults};
use crate::domain::value_objects::BitId;

use super::plugin::Plugin;

/// Result type for scope operations
pub type ScopeResult<T> = Result<T, ScopeError>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScopeError {
    #[error("environment '{id}' is not installed in the scope")]
    EnvironmentNotFound { id: String },

    #[error("component '{id}' was not found in the scope")]
    ComponentNotFound { id: String },

    #[error("environment '{id}' has an invalid plugin manifest: {message}")]
    InvalidPlugin { id: String, message: String },

    #[error("failed to access scope: {message}")]
    AccessError { message: String },

    #[error("failed to serialize scope object: {message}")]
    SerializationError { message: String },

    #[error(
        "scope object corrupted: {path}\n  → Fix: re-import the component with `bitpm put`\n  → Details: {message}"
    )]
    Corrupted { path: PathBuf, message: String },
}

/// Environments to make available locally
#[derive(Debug, Clone, Copy)]
pub struct InstallRequest<'a> {
    pub ids: &'a [&'a BitId],
    pub consumer: Option<&'a Consumer>,
    pub verbose: bool,
}

/// How a plugin should be resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Resolve against the scope alone, without a consumer project
    pub bare_scope: bool,
}

impl LoadOptions {
    pub fn for_consumer(consumer: Option<&Consumer>) -> Self {
        Self {
            bare_scope: consumer.is_none(),
        }
    }
}

/// Backing repository of components and plugin environments
pub trait Scope {
    /// Scope name, used as the `scope` part of committed ids
    fn name(&self) -> &str;

    /// Ensure the named plugin environments are available locally
    fn install_environment(&self, request: &InstallRequest<'_>) -> ScopeResult<()>;

    /// Resolve a plugin (compiler, or template provider) for in-process use
    fn load_plugin(&self, id: &BitId, options: LoadOptions) -> ScopeResult<Box<dyn Plugin>>;

    /// Resolve a tester plugin to its executable path only
    fn load_tester_path(&self, id: &BitId, options: LoadOptions) -> ScopeResult<PathBuf>;

    fn sources(&self) -> &dyn SourceRepository;
}

/// Persistence of component objects
pub trait SourceRepository {
    /// Persist the component's current distribution artifact
    fn update_dist(&self, source: &Component) -> ScopeResult<()>;

    /// Persist the component's current specs results
    fn modify_specs_results(
        &self,
        source: &Component,
        specs_results: &SpecsResults,
    ) -> ScopeResult<()>;

    /// Store a fully-identified component with its log entry
    fn put(&self, source: &Component, log: &CommitLog) -> ScopeResult<()>;

    /// Load a stored component; a versionless id resolves to the latest version
    fn get(&self, id: &BitId) -> ScopeResult<Component>;

    /// Highest stored version of `box/name`, if any
    fn latest_version(&self, box_name: &str, name: &str) -> ScopeResult<Option<u32>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_options_follow_consumer_presence() {
        assert!(LoadOptions::for_consumer(None).bare_scope);
    }

    #[test]
    fn scope_error_display_names_the_id() {
        let err = ScopeError::EnvironmentNotFound {
            id: "envs/testers/mocha@1".to_string(),
        };
        assert!(err.to_string().contains("envs/testers/mocha@1"));
    }
}
