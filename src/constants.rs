//! Well-known names and defaults shared across the crate

/// Box assigned to ids and components that do not name one
pub const DEFAULT_BOX_NAME: &str = "global";

/// Implementation file name when `bit.json` does not set one
pub const DEFAULT_IMPL_NAME: &str = "impl.js";

/// Specs file name when `bit.json` does not set one
pub const DEFAULT_SPECS_NAME: &str = "spec.js";

/// Version given to freshly authored components
pub const DEFAULT_BIT_VERSION: u32 = 1;

/// Sentinel written to `bit.json` when no compiler/tester is configured
pub const NO_PLUGIN_TYPE: &str = "none";

/// Project config file name
pub const BIT_JSON: &str = "bit.json";

pub const DEFAULT_LICENSE_FILENAME: &str = "LICENSE";

/// Directory (relative to the component dir) holding compiled output
pub const DEFAULT_DIST_DIRNAME: &str = "dist";

/// Consumer directory holding components under local development
pub const INLINE_COMPONENTS_DIRNAME: &str = "inline_components";

/// Separator between the id path and its version in canonical ids
pub const VERSION_DELIMITER: char = '@';

/// Separator between scope, box and name in canonical ids
pub const ID_DELIMITER: char = '/';
