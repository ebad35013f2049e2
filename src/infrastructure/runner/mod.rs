//! Specs Runner Implementations

mod process;

pub use process::{ProcessSpecsRunner, TESTER_ID_ENV};
