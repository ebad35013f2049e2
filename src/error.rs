//! Error types for bitpm
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::SpecsResults;
use crate::domain::ports::{FsError, PluginError, RunnerError, ScopeError};

/// Result type alias for bitpm operations
pub type BitResult<T> = Result<T, BitError>;

/// Main error type for bitpm operations
#[derive(Error, Debug)]
pub enum BitError {
    /// A fully-qualified id was requested before scope and version were set
    #[error("cant produce id of component '{name}' because scope or version are missing")]
    IdentityIncomplete { name: String },

    /// The inline component directory does not exist
    #[error("component not found in {path}")]
    ComponentNotFoundInline { path: PathBuf },

    /// The resolved compiler plugin has no compile capability
    #[error("\"{id}\" does not have a valid compiler interface")]
    InvalidCompiler { id: String },

    /// Specs ran to completion and reported failures
    #[error("specs of component '{component}' failed")]
    SpecsFailed {
        component: String,
        results: Box<SpecsResults>,
    },

    /// Canonical identity string could not be parsed
    #[error("invalid bit id '{input}': {reason}")]
    MalformedId { input: String, reason: String },

    /// Component version is not a non-negative integer
    #[error("invalid component version '{value}'")]
    InvalidVersion { value: String },

    /// Project config (`bit.json`) could not be read or parsed
    #[error("invalid bit.json in {path}: {message}")]
    BitJson { path: PathBuf, message: String },

    /// Compiler plugin failed while executing
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// Specs runner failed before producing results
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// Scope (object store) failure
    #[error(transparent)]
    Scope(#[from] ScopeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<FsError> for BitError {
    fn from(err: FsError) -> Self {
        BitError::Io(err.into())
    }
}

impl BitError {
    /// True when the error is a test-failure rejection rather than an execution error
    pub fn is_specs_failure(&self) -> bool {
        matches!(self, BitError::SpecsFailed { .. })
    }
}
