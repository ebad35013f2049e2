//! Application Layer
//!
//! Orchestration over the domain: build and specs pipelines, working
//! directory persistence, and the commit/put workflows.
//!
//! `build`, `run_specs`, `write`, `create` and the load paths are inherent
//! methods of [`Component`](crate::domain::entities::Component) defined here.

mod build;
mod commit;
mod lifecycle;
mod put;
mod specs;
mod write;

pub use build::{BuildOptions, Built};
pub use commit::{commit, CommitOptions, Committed};
pub use lifecycle::CreateOptions;
pub use put::{export, put};
pub use specs::{SpecsOptions, SpecsRun};
pub use write::WriteReport;
