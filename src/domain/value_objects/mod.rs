//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod bit_id;
mod bit_ids;

pub use bit_id::BitId;
pub use bit_ids::{BitIds, PlainMapping};
