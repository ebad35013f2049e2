//! Specs Runner port
//!
//! Executes a tester plugin against compiled implementation and specs sources.

use std::path::Path;

use crate::domain::entities::RawResults;
use crate::domain::value_objects::BitId;

use super::scope::Scope;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to launch tester '{tester}': {message}")]
    Launch { tester: String, message: String },

    #[error("tester crashed (exit status {status:?}): {stderr}")]
    Crashed { status: Option<i32>, stderr: String },

    #[error("tester produced unreadable results: {message}")]
    InvalidResults { message: String },

    #[error("IO error while preparing specs: {0}")]
    Io(#[from] std::io::Error),
}

/// One specs execution
pub struct RunRequest<'a> {
    pub scope: &'a dyn Scope,
    pub tester_file_path: &'a Path,
    pub impl_src: &'a str,
    pub specs_src: &'a str,
    pub tester_id: &'a BitId,
}

pub trait SpecsRunner {
    fn run(&self, request: RunRequest<'_>) -> Result<RawResults, RunnerError>;
}
