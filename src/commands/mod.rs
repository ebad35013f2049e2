//! Command handlers for the bitpm binary

mod commit;
mod component;
mod scope;
mod workspace;

pub use commit::cmd_commit;
pub use component::{cmd_build, cmd_create, cmd_test};
pub use scope::{cmd_put, cmd_show};
