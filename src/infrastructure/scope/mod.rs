//! Scope Implementations
//!
//! `FsScope` stores component objects and plugin environments on disk.

mod environment;
mod fs_scope;
mod index;

pub use environment::{EnvironmentPlugin, PluginManifest, ProcessCompiler};
pub use fs_scope::FsScope;
