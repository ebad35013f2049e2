//! Import of serialized components into a scope
//!
//! Input is newline-delimited JSON, one component record per line.

use std::io::BufRead;

use crate::domain::entities::{CommitLog, Component};
use crate::domain::ports::Scope;
use crate::domain::value_objects::BitId;
use crate::error::BitResult;

/// Store every record read from `input`; returns the stored ids in order
///
/// Blank lines are ignored. Records must carry scope and version. The first
/// invalid record aborts the import; records before it stay stored.
pub fn put<R: BufRead>(scope: &dyn Scope, input: R) -> BitResult<Vec<BitId>> {
    let mut stored = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let component = Component::from_json(&line)?;
        let id = component.id()?;
        scope
            .sources()
            .put(&component, &CommitLog::new(format!("put {}", id)))?;
        stored.push(id);
    }
    Ok(stored)
}

/// One NDJSON line for `component`
pub fn export(component: &Component) -> BitResult<String> {
    component.to_json()
}
