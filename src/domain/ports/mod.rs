//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_events;
pub mod file_system;
pub mod plugin;
pub mod scope;
pub mod specs_runner;

pub use build_events::{BuildEvent, BuildEventSink, NoopEventSink};
pub use file_system::{FileSystem, FsError, FsResult, SharedFs};
pub use plugin::{Compiled, Compiler, Plugin, PluginError};
pub use scope::{InstallRequest, LoadOptions, Scope, ScopeError, ScopeResult, SourceRepository};
pub use specs_runner::{RunRequest, RunnerError, SpecsRunner};
