//! Common test utilities for bitpm CLI scenario tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project + config home with helpers to run the binary
//! - Fixtures: shell-script compiler and tester environments

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
