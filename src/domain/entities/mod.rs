//! Domain Entities
//!
//! - `Component` - a versioned unit of code with its artifacts
//! - `source` - lazily loaded artifacts (Impl, Specs, Misc, Dist, License)
//! - `SpecsResults` - normalized outcome of a specs run
//! - `Doclet` - documentation parsed from the implementation
//! - `CommitLog` - message stored with a committed version

mod commit_log;
mod component;
mod doclet;
mod source;
mod specs_results;

pub use commit_log::CommitLog;
pub use component::{Component, ComponentObject, PackageDependencies};
pub use doclet::{parse_docs, DocParam, DocReturns, Doclet};
pub use source::{
    ArtifactKind, Dist, DistRecord, Impl, License, Misc, MiscFile, MiscRecord, Source,
    SourceState, Specs, TextArtifact,
};
pub use specs_results::{
    RawDuration, RawResults, RawStats, RawTest, SpecsResults, Stats, TestError, TestResult,
};
