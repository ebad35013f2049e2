//! Tool configuration (`.bitpm/config.toml`)
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (BITPM_*)
//! 3. Project config (.bitpm/config.toml)
//! 4. User config (<config_dir>/bitpm/config.toml)
//! 5. Built-in defaults (lowest priority)
//!
//! Project-level component defaults live in `bit.json`, see [`crate::consumer`].

mod loader;
mod types;

pub use loader::{project_config_path, user_config_path, ConfigWarning};
pub use types::{
    Config, EnvironmentsConfig, OutputConfig, RunnerConfig, ScopeConfig, Verbosity,
    CONFIG_DIRNAME,
};
