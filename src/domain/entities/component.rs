//! Component entity - a versioned, shareable unit of source code
//!
//! A component aggregates its identity, dependency set and artifacts
//! (implementation, specs, misc files, compiled dist, license). Artifacts
//! referenced by path are read lazily on first access.
//!
//! Build and specs orchestration live in `application::{build, specs}`;
//! disk persistence in `application::write`.

use std::cell::OnceCell;
use std::collections::BTreeMap;

use crate::constants::{DEFAULT_BOX_NAME, DEFAULT_IMPL_NAME, DEFAULT_SPECS_NAME};
use crate::domain::value_objects::{BitId, BitIds};
use crate::error::{BitError, BitResult};

use super::doclet::{parse_docs, Doclet};
use super::source::{Dist, Impl, License, Misc, Specs};
use super::specs_results::SpecsResults;

mod object;

pub use object::ComponentObject;

/// External package name → version range
pub type PackageDependencies = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct Component {
    name: String,
    box_name: String,
    version: Option<u32>,
    scope: Option<String>,
    impl_file: String,
    specs_file: String,
    misc_files: Vec<String>,
    compiler_id: Option<BitId>,
    tester_id: Option<BitId>,
    dependencies: BitIds,
    package_dependencies: PackageDependencies,
    implementation: Impl,
    specs: Option<Specs>,
    misc: Option<Misc>,
    docs: OnceCell<Vec<Doclet>>,
    dist: Option<Dist>,
    specs_results: Option<SpecsResults>,
    license: Option<License>,
    deprecate: Option<String>,
}

impl Component {
    /// Create a component with default file names and no optional parts
    ///
    /// An empty `box_name` falls back to the default box.
    pub fn new(name: impl Into<String>, box_name: impl Into<String>, implementation: Impl) -> Self {
        let box_name = box_name.into();
        Self {
            name: name.into(),
            box_name: if box_name.is_empty() {
                DEFAULT_BOX_NAME.to_string()
            } else {
                box_name
            },
            version: None,
            scope: None,
            impl_file: DEFAULT_IMPL_NAME.to_string(),
            specs_file: DEFAULT_SPECS_NAME.to_string(),
            misc_files: Vec::new(),
            compiler_id: None,
            tester_id: None,
            dependencies: BitIds::new(),
            package_dependencies: PackageDependencies::new(),
            implementation,
            specs: None,
            misc: None,
            docs: OnceCell::new(),
            dist: None,
            specs_results: None,
            license: None,
            deprecate: None,
        }
    }

    // --- Builders ---

    pub fn with_version(mut self, version: Option<u32>) -> Self {
        self.version = version;
        self
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_impl_file(mut self, impl_file: impl Into<String>) -> Self {
        self.impl_file = impl_file.into();
        self
    }

    pub fn with_specs_file(mut self, specs_file: impl Into<String>) -> Self {
        self.specs_file = specs_file.into();
        self
    }

    pub fn with_misc_files(mut self, misc_files: Vec<String>) -> Self {
        self.misc_files = misc_files;
        self
    }

    pub fn with_compiler_id(mut self, compiler_id: Option<BitId>) -> Self {
        self.compiler_id = compiler_id;
        self
    }

    pub fn with_tester_id(mut self, tester_id: Option<BitId>) -> Self {
        self.tester_id = tester_id;
        self
    }

    pub fn with_dependencies(mut self, dependencies: BitIds) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_package_dependencies(mut self, package_dependencies: PackageDependencies) -> Self {
        self.package_dependencies = package_dependencies;
        self
    }

    pub fn with_specs(mut self, specs: Option<Specs>) -> Self {
        self.specs = specs;
        self
    }

    pub fn with_misc(mut self, misc: Option<Misc>) -> Self {
        self.misc = misc;
        self
    }

    /// Preset docs (e.g. from a stored object) instead of parsing the implementation
    pub fn with_docs(mut self, docs: Vec<Doclet>) -> Self {
        self.docs = OnceCell::from(docs);
        self
    }

    pub fn with_dist(mut self, dist: Option<Dist>) -> Self {
        self.dist = dist;
        self
    }

    pub fn with_specs_results(mut self, specs_results: Option<SpecsResults>) -> Self {
        self.specs_results = specs_results;
        self
    }

    pub fn with_license(mut self, license: Option<License>) -> Self {
        self.license = license;
        self
    }

    pub fn with_deprecate(mut self, deprecate: Option<String>) -> Self {
        self.deprecate = deprecate;
        self
    }

    // --- Getters ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn box_name(&self) -> &str {
        &self.box_name
    }

    pub fn version(&self) -> Option<u32> {
        self.version
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn impl_file(&self) -> &str {
        &self.impl_file
    }

    pub fn specs_file(&self) -> &str {
        &self.specs_file
    }

    pub fn misc_files(&self) -> &[String] {
        &self.misc_files
    }

    pub fn compiler_id(&self) -> Option<&BitId> {
        self.compiler_id.as_ref()
    }

    pub fn tester_id(&self) -> Option<&BitId> {
        self.tester_id.as_ref()
    }

    pub fn dependencies(&self) -> &BitIds {
        &self.dependencies
    }

    pub fn package_dependencies(&self) -> &PackageDependencies {
        &self.package_dependencies
    }

    pub fn implementation(&self) -> &Impl {
        &self.implementation
    }

    /// Specs artifact; `None` when specs were never set (distinct from empty specs)
    pub fn specs(&self) -> Option<&Specs> {
        self.specs.as_ref()
    }

    pub fn misc(&self) -> Option<&Misc> {
        self.misc.as_ref()
    }

    pub fn dist(&self) -> Option<&Dist> {
        self.dist.as_ref()
    }

    pub fn specs_results(&self) -> Option<&SpecsResults> {
        self.specs_results.as_ref()
    }

    pub fn license(&self) -> Option<&License> {
        self.license.as_ref()
    }

    pub fn deprecate(&self) -> Option<&str> {
        self.deprecate.as_deref()
    }

    /// `box/name`, usable before the component has a scope or version
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.box_name, self.name)
    }

    /// Fully-qualified identity
    ///
    /// Fails with [`BitError::IdentityIncomplete`] unless both scope and
    /// version are set.
    pub fn id(&self) -> BitResult<BitId> {
        match (self.scope.as_deref(), self.version) {
            (Some(scope), Some(version)) => BitId::new(
                Some(scope),
                &self.box_name,
                &self.name,
                Some(&version.to_string()),
            ),
            _ => Err(BitError::IdentityIncomplete {
                name: self.display_name(),
            }),
        }
    }

    /// Docs parsed from the implementation source, computed once
    pub fn docs(&self) -> BitResult<&[Doclet]> {
        if let Some(docs) = self.docs.get() {
            return Ok(docs);
        }
        let parsed = parse_docs(self.implementation.src()?);
        Ok(self.docs.get_or_init(|| parsed))
    }

    /// Specs source when there is something to run
    ///
    /// `None` both when specs are absent and when their source is empty.
    /// Whitespace-only specs still run.
    pub fn runnable_specs(&self) -> BitResult<Option<&str>> {
        match &self.specs {
            Some(specs) => {
                let src = specs.src()?;
                Ok((!src.is_empty()).then_some(src))
            }
            None => Ok(None),
        }
    }

    /// License with non-empty content
    pub fn license_with_content(&self) -> BitResult<Option<&License>> {
        match &self.license {
            Some(license) if !license.is_blank()? => Ok(Some(license)),
            _ => Ok(None),
        }
    }

    // --- Serialization ---

    pub fn to_object(&self) -> BitResult<ComponentObject> {
        ComponentObject::from_component(self)
    }

    pub fn from_object(object: ComponentObject) -> BitResult<Self> {
        object.into_component()
    }

    pub fn to_json(&self) -> BitResult<String> {
        Ok(serde_json::to_string(&self.to_object()?)?)
    }

    pub fn from_json(json: &str) -> BitResult<Self> {
        Self::from_object(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests;
