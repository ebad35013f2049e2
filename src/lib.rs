//! bitpm - component package manager
//!
//! Models independently versioned components (implementation, specs, docs,
//! dependencies) and orchestrates building and testing them through
//! compiler and tester plugins resolved from a scope.

pub mod application;
pub mod config;
pub mod constants;
pub mod consumer;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{BuildOptions, Built, SpecsOptions, SpecsRun};
pub use config::Config;
pub use consumer::{BitJson, Consumer};
pub use domain::entities::{Component, SpecsResults};
pub use domain::value_objects::{BitId, BitIds};
pub use error::{BitError, BitResult};
