//! Plain record form of a component
//!
//! The same record is used for objects stored in a scope and for components
//! sent between scopes.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Component, PackageDependencies};
use crate::domain::entities::doclet::Doclet;
use crate::domain::entities::source::{
    Dist, DistRecord, Impl, License, Misc, MiscRecord, Specs,
};
use crate::domain::entities::specs_results::SpecsResults;
use crate::domain::value_objects::{BitId, BitIds, PlainMapping};
use crate::error::{BitError, BitResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentObject {
    pub name: String,
    #[serde(rename = "box")]
    pub box_name: String,
    #[serde(default, deserialize_with = "deserialize_version")]
    pub version: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub impl_file: Option<String>,
    #[serde(default)]
    pub specs_file: Option<String>,
    #[serde(default)]
    pub misc_files: Vec<String>,
    #[serde(default)]
    pub compiler_id: Option<String>,
    #[serde(default)]
    pub tester_id: Option<String>,
    #[serde(default)]
    pub dependencies: PlainMapping,
    #[serde(default)]
    pub package_dependencies: PackageDependencies,
    #[serde(default)]
    pub specs: Option<String>,
    #[serde(rename = "impl")]
    pub implementation: String,
    #[serde(default)]
    pub misc: Option<Vec<MiscRecord>>,
    #[serde(default)]
    pub docs: Option<Vec<Doclet>>,
    #[serde(default)]
    pub dist: Option<DistRecord>,
    #[serde(default)]
    pub specs_results: Option<SpecsResults>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub deprecate: Option<String>,
}

/// Versions arrive as strings from this crate and as numbers from older writers
#[derive(Deserialize)]
#[serde(untagged)]
enum VersionField {
    Number(u64),
    Text(String),
}

fn deserialize_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<VersionField>::deserialize(deserializer)?.map(|field| match field {
            VersionField::Number(n) => n.to_string(),
            VersionField::Text(text) => text,
        }),
    )
}

fn parse_version(value: &str) -> BitResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| BitError::InvalidVersion {
            value: value.to_string(),
        })
}

impl ComponentObject {
    pub(super) fn from_component(component: &Component) -> BitResult<Self> {
        Ok(Self {
            name: component.name.clone(),
            box_name: component.box_name.clone(),
            version: component.version.map(|v| v.to_string()),
            scope: component.scope.clone(),
            impl_file: Some(component.impl_file.clone()),
            specs_file: Some(component.specs_file.clone()),
            misc_files: component.misc_files.clone(),
            compiler_id: component.compiler_id.as_ref().map(BitId::to_string),
            tester_id: component.tester_id.as_ref().map(BitId::to_string),
            dependencies: component.dependencies.to_plain_mapping(),
            package_dependencies: component.package_dependencies.clone(),
            specs: component.specs.as_ref().map(Specs::serialize).transpose()?,
            implementation: component.implementation.serialize()?,
            misc: component.misc.as_ref().map(Misc::serialize).transpose()?,
            docs: Some(component.docs()?.to_vec()),
            dist: component.dist.as_ref().map(Dist::serialize),
            specs_results: component.specs_results.as_ref().map(SpecsResults::serialize),
            license: component.license.as_ref().map(License::serialize).transpose()?,
            deprecate: component.deprecate.clone(),
        })
    }

    pub(super) fn into_component(self) -> BitResult<Component> {
        let version = self.version.as_deref().map(parse_version).transpose()?;
        let compiler_id = match self.compiler_id.as_deref() {
            Some(raw) => BitId::parse_plugin(raw)?,
            None => None,
        };
        let tester_id = match self.tester_id.as_deref() {
            Some(raw) => BitId::parse_plugin(raw)?,
            None => None,
        };

        let mut component = Component::new(
            self.name,
            self.box_name,
            Impl::deserialize(self.implementation),
        )
        .with_version(version)
        .with_scope(self.scope)
        .with_misc_files(self.misc_files)
        .with_compiler_id(compiler_id)
        .with_tester_id(tester_id)
        .with_dependencies(BitIds::from_plain_mapping(&self.dependencies)?)
        .with_package_dependencies(self.package_dependencies)
        .with_specs(self.specs.map(Specs::deserialize))
        .with_misc(self.misc.map(Misc::deserialize))
        .with_dist(self.dist.map(Dist::deserialize))
        .with_specs_results(self.specs_results.map(SpecsResults::deserialize))
        .with_license(self.license.map(License::deserialize))
        .with_deprecate(self.deprecate);

        if let Some(impl_file) = self.impl_file {
            component = component.with_impl_file(impl_file);
        }
        if let Some(specs_file) = self.specs_file {
            component = component.with_specs_file(specs_file);
        }
        if let Some(docs) = self.docs {
            component = component.with_docs(docs);
        }

        Ok(component)
    }
}
