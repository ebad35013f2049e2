//! Domain Layer
//!
//! Components, their identities and artifacts, plus the ports through which
//! orchestration reaches the scope, plugins and the specs runner.
//!
//! ## Structure
//!
//! - `entities/` - Component, source artifacts, specs results, doclets
//! - `value_objects/` - Immutable value types (BitId, BitIds)
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod value_objects;
