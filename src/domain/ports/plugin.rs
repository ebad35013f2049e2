//! Environment plugin port
//!
//! A compiler or tester resolved by identity from the scope. Compilers are
//! used in-process through [`Compiler`]; testers are only ever referenced by
//! executable path (see [`Scope::load_tester_path`](super::Scope::load_tester_path)).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output of a compile call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compiled {
    pub code: String,
    #[serde(default)]
    pub map: Option<Value>,
}

impl Compiled {
    pub fn new(code: impl Into<String>, map: Option<Value>) -> Self {
        Self {
            code: code.into(),
            map,
        }
    }
}

/// Plugin execution errors
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("plugin '{id}' failed: {message}")]
    Execution { id: String, message: String },

    #[error("plugin '{id}' produced invalid output: {message}")]
    InvalidOutput { id: String, message: String },
}

/// Compile capability of a compiler plugin
pub trait Compiler {
    fn compile(&self, src: &str) -> Result<Compiled, PluginError>;
}

/// A loaded environment plugin
pub trait Plugin {
    /// Compile capability, if this plugin has one
    fn compiler(&self) -> Option<&dyn Compiler> {
        None
    }

    /// Starter content for a new artifact of the named component
    fn template(&self, _name: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Compiler for Upper {
        fn compile(&self, src: &str) -> Result<Compiled, PluginError> {
            Ok(Compiled::new(src.to_uppercase(), None))
        }
    }

    struct WithCompiler(Upper);

    impl Plugin for WithCompiler {
        fn compiler(&self) -> Option<&dyn Compiler> {
            Some(&self.0)
        }
    }

    struct Bare;

    impl Plugin for Bare {}

    #[test]
    fn default_plugin_has_no_capabilities() {
        assert!(Bare.compiler().is_none());
        assert!(Bare.template("foo").is_none());
    }

    #[test]
    fn compiler_capability_is_reachable() {
        let plugin = WithCompiler(Upper);
        let compiled = plugin.compiler().unwrap().compile("abc").unwrap();
        assert_eq!(compiled.code, "ABC");
    }

    #[test]
    fn compiled_output_deserializes_without_map() {
        let compiled: Compiled = serde_json::from_str(r#"{"code":"x"}"#).unwrap();
        assert_eq!(compiled, Compiled::new("x", None));
    }
}
