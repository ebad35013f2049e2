//! Project config (`bit.json`)
//!
//! A consumer keeps a `bit.json` at its root with project-wide defaults; each
//! component directory may carry its own `bit.json` that overrides those
//! defaults field by field.
//!
//! ```json
//! {
//!   "version": 1,
//!   "scope": "acme",
//!   "sources": { "impl": "impl.js", "spec": "spec.js", "misc": [] },
//!   "env": { "compiler": "none", "tester": "none" },
//!   "dependencies": {},
//!   "packageDependencies": {}
//! }
//! ```
//!
//! `version` and `scope` record where a written component came from; they
//! are informational and never override the identity of a loaded component.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{BIT_JSON, DEFAULT_IMPL_NAME, DEFAULT_SPECS_NAME, NO_PLUGIN_TYPE};
use crate::domain::entities::PackageDependencies;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{BitId, BitIds, PlainMapping};
use crate::error::{BitError, BitResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SourcesSection {
    #[serde(rename = "impl", default, skip_serializing_if = "Option::is_none")]
    impl_file: Option<String>,
    #[serde(rename = "spec", default, skip_serializing_if = "Option::is_none")]
    spec_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    misc: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct EnvSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    compiler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tester: Option<String>,
}

/// On-disk shape; every field optional so partial files can override defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BitJsonFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(default)]
    sources: SourcesSection,
    #[serde(default)]
    env: EnvSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dependencies: Option<PlainMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package_dependencies: Option<PackageDependencies>,
}

/// Resolved project config
#[derive(Debug, Clone, PartialEq)]
pub struct BitJson {
    version: Option<u32>,
    scope: Option<String>,
    impl_file: String,
    spec_file: String,
    misc_files: Vec<String>,
    compiler: String,
    tester: String,
    dependencies: PlainMapping,
    package_dependencies: PackageDependencies,
}

/// The project-root `bit.json`, used as defaults for every component
pub type ConsumerBitJson = BitJson;

impl Default for BitJson {
    fn default() -> Self {
        Self {
            version: None,
            scope: None,
            impl_file: DEFAULT_IMPL_NAME.to_string(),
            spec_file: DEFAULT_SPECS_NAME.to_string(),
            misc_files: Vec::new(),
            compiler: NO_PLUGIN_TYPE.to_string(),
            tester: NO_PLUGIN_TYPE.to_string(),
            dependencies: PlainMapping::new(),
            package_dependencies: PackageDependencies::new(),
        }
    }
}

impl BitJson {
    /// Build a config from component values; absent plugins become the `none` sentinel
    pub fn new(
        impl_file: impl Into<String>,
        spec_file: impl Into<String>,
        misc_files: Vec<String>,
        compiler: Option<&BitId>,
        tester: Option<&BitId>,
        dependencies: &BitIds,
        package_dependencies: PackageDependencies,
    ) -> Self {
        Self {
            version: None,
            scope: None,
            impl_file: impl_file.into(),
            spec_file: spec_file.into(),
            misc_files,
            compiler: compiler.map_or_else(|| NO_PLUGIN_TYPE.to_string(), BitId::to_string),
            tester: tester.map_or_else(|| NO_PLUGIN_TYPE.to_string(), BitId::to_string),
            dependencies: dependencies.to_plain_mapping(),
            package_dependencies,
        }
    }

    /// Record the version and scope of the component being written
    pub fn with_provenance(mut self, version: Option<u32>, scope: Option<&str>) -> Self {
        self.version = version;
        self.scope = scope.map(str::to_string);
        self
    }

    /// Load `dir/bit.json` on top of `defaults`; a missing file yields the defaults
    pub fn load(fs: &dyn FileSystem, dir: &Path, defaults: &ConsumerBitJson) -> BitResult<Self> {
        let path = dir.join(BIT_JSON);
        if !fs.exists(&path) {
            return Ok(defaults.clone());
        }

        let content = fs.read(&path)?;
        let file: BitJsonFile =
            serde_json::from_str(&content).map_err(|e| BitError::BitJson {
                path: path.clone(),
                message: e.to_string(),
            })?;
        Ok(defaults.clone().merge(file))
    }

    /// Load a consumer's root `bit.json` over the built-in defaults
    pub fn load_consumer(fs: &dyn FileSystem, root: &Path) -> BitResult<ConsumerBitJson> {
        Self::load(fs, root, &Self::default())
    }

    fn merge(mut self, file: BitJsonFile) -> Self {
        if let Some(version) = file.version {
            self.version = Some(version);
        }
        if let Some(scope) = file.scope {
            self.scope = Some(scope);
        }
        if let Some(impl_file) = file.sources.impl_file {
            self.impl_file = impl_file;
        }
        if let Some(spec_file) = file.sources.spec_file {
            self.spec_file = spec_file;
        }
        if let Some(misc) = file.sources.misc {
            self.misc_files = misc;
        }
        if let Some(compiler) = file.env.compiler {
            self.compiler = compiler;
        }
        if let Some(tester) = file.env.tester {
            self.tester = tester;
        }
        if let Some(dependencies) = file.dependencies {
            self.dependencies = dependencies;
        }
        if let Some(package_dependencies) = file.package_dependencies {
            self.package_dependencies = package_dependencies;
        }
        self
    }

    fn to_file(&self) -> BitJsonFile {
        BitJsonFile {
            version: self.version,
            scope: self.scope.clone(),
            sources: SourcesSection {
                impl_file: Some(self.impl_file.clone()),
                spec_file: Some(self.spec_file.clone()),
                misc: Some(self.misc_files.clone()),
            },
            env: EnvSection {
                compiler: Some(self.compiler.clone()),
                tester: Some(self.tester.clone()),
            },
            dependencies: Some(self.dependencies.clone()),
            package_dependencies: Some(self.package_dependencies.clone()),
        }
    }

    /// Write `dir/bit.json`; skipped when it exists and `force` is false
    pub fn write(&self, fs: &dyn FileSystem, dir: &Path, force: bool) -> BitResult<bool> {
        let path = dir.join(BIT_JSON);
        if !force && fs.exists(&path) {
            return Ok(false);
        }
        let mut content = serde_json::to_string_pretty(&self.to_file())?;
        content.push('\n');
        fs.write(&path, &content)?;
        Ok(true)
    }

    pub fn version(&self) -> Option<u32> {
        self.version
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn impl_basename(&self) -> &str {
        &self.impl_file
    }

    pub fn spec_basename(&self) -> &str {
        &self.spec_file
    }

    pub fn misc_files(&self) -> &[String] {
        &self.misc_files
    }

    /// Raw compiler reference, possibly the `none` sentinel
    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    pub fn tester(&self) -> &str {
        &self.tester
    }

    pub fn compiler_id(&self) -> BitResult<Option<BitId>> {
        BitId::parse_plugin(&self.compiler)
    }

    pub fn tester_id(&self) -> BitResult<Option<BitId>> {
        BitId::parse_plugin(&self.tester)
    }

    pub fn dependencies(&self) -> BitResult<BitIds> {
        BitIds::from_plain_mapping(&self.dependencies)
    }

    pub fn package_dependencies(&self) -> &PackageDependencies {
        &self.package_dependencies
    }
}
