//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `scope/` - Directory-backed scope and plugin environments
//! - `runner/` - Subprocess specs runner
//! - `events/` - Build event sinks (console, JSON)

pub mod events;
pub mod fs;
pub mod runner;
pub mod scope;

pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use runner::ProcessSpecsRunner;
pub use scope::FsScope;
