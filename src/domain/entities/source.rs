//! Source artifacts - the content pieces of a component
//!
//! Every artifact starts either as a file reference ([`SourceState::Unloaded`])
//! or as in-memory content ([`SourceState::Loaded`]). Reading the content of an
//! unloaded artifact reads the file once, through the [`FileSystem`] it was
//! loaded with, and memoizes it.

use std::cell::OnceCell;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DEFAULT_DIST_DIRNAME, DEFAULT_LICENSE_FILENAME};
use crate::domain::ports::{FileSystem, FsError, SharedFs};
use crate::error::BitResult;

/// Where an artifact's content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceState {
    Unloaded(PathBuf),
    Loaded(String),
}

impl SourceState {
    /// Produce the loaded form of this state
    pub fn resolve(&self, fs: &dyn FileSystem) -> BitResult<SourceState> {
        match self {
            SourceState::Loaded(content) => Ok(SourceState::Loaded(content.clone())),
            SourceState::Unloaded(path) => Ok(SourceState::Loaded(fs.read(path)?)),
        }
    }
}

/// Lazily-loaded text content
#[derive(Debug, Clone)]
pub struct Source {
    state: SourceState,
    reader: Option<SharedFs>,
    loaded: OnceCell<String>,
}

impl Source {
    /// Reference a file; nothing is read until [`Source::src`] is called
    pub fn load(fs: SharedFs, path: impl Into<PathBuf>) -> Self {
        Self {
            state: SourceState::Unloaded(path.into()),
            reader: Some(fs),
            loaded: OnceCell::new(),
        }
    }

    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            state: SourceState::Loaded(content.into()),
            reader: None,
            loaded: OnceCell::new(),
        }
    }

    pub fn state(&self) -> &SourceState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SourceState::Loaded(_)) || self.loaded.get().is_some()
    }

    /// Content, reading the backing file on first access
    pub fn src(&self) -> BitResult<&str> {
        match &self.state {
            SourceState::Loaded(content) => Ok(content),
            SourceState::Unloaded(path) => {
                if let Some(content) = self.loaded.get() {
                    return Ok(content);
                }
                let fs = self.reader.as_deref().ok_or_else(|| {
                    FsError::Other(format!("no file system to read {}", path.display()))
                })?;
                let content = fs.read(path)?;
                Ok(self.loaded.get_or_init(|| content))
            }
        }
    }

    /// Write content to `dir/filename`
    ///
    /// Returns false when the target exists and `force` is not set.
    pub fn write(
        &self,
        fs: &dyn FileSystem,
        dir: &Path,
        filename: &str,
        force: bool,
    ) -> BitResult<bool> {
        write_text(fs, &dir.join(filename), self.src()?, force)
    }
}

fn write_text(fs: &dyn FileSystem, target: &Path, content: &str, force: bool) -> BitResult<bool> {
    if !force && fs.exists(target) {
        return Ok(false);
    }
    fs.write(target, content)?;
    Ok(true)
}

/// Marker for the kind of a text artifact
pub trait ArtifactKind {
    const LABEL: &'static str;
}

#[derive(Debug, Clone, Copy)]
pub struct ImplKind;

#[derive(Debug, Clone, Copy)]
pub struct SpecsKind;

#[derive(Debug, Clone, Copy)]
pub struct LicenseKind;

impl ArtifactKind for ImplKind {
    const LABEL: &'static str = "impl";
}

impl ArtifactKind for SpecsKind {
    const LABEL: &'static str = "specs";
}

impl ArtifactKind for LicenseKind {
    const LABEL: &'static str = "license";
}

/// A single-file text artifact; serializes to its plain content
#[derive(Debug, Clone)]
pub struct TextArtifact<K> {
    source: Source,
    kind: PhantomData<K>,
}

pub type Impl = TextArtifact<ImplKind>;
pub type Specs = TextArtifact<SpecsKind>;
pub type License = TextArtifact<LicenseKind>;

impl<K: ArtifactKind> TextArtifact<K> {
    pub fn load(fs: SharedFs, path: impl Into<PathBuf>) -> Self {
        Self::from_source(Source::load(fs, path))
    }

    pub fn new(content: impl Into<String>) -> Self {
        Self::from_source(Source::from_content(content))
    }

    fn from_source(source: Source) -> Self {
        Self {
            source,
            kind: PhantomData,
        }
    }

    pub fn label(&self) -> &'static str {
        K::LABEL
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn src(&self) -> BitResult<&str> {
        self.source.src()
    }

    /// True when the content is empty or whitespace only
    pub fn is_blank(&self) -> BitResult<bool> {
        Ok(self.src()?.trim().is_empty())
    }

    pub fn write(
        &self,
        fs: &dyn FileSystem,
        dir: &Path,
        filename: &str,
        force: bool,
    ) -> BitResult<bool> {
        self.source.write(fs, dir, filename, force)
    }

    pub fn serialize(&self) -> BitResult<String> {
        Ok(self.src()?.to_string())
    }

    pub fn deserialize(record: String) -> Self {
        Self::new(record)
    }
}

impl Impl {
    /// Starter implementation for a new component
    ///
    /// `template` comes from the compiler environment when it provides one.
    pub fn create(name: &str, template: Option<String>) -> Self {
        Self::new(template.unwrap_or_else(|| default_impl_template(name)))
    }
}

impl Specs {
    /// Starter specs for a new component
    pub fn create(name: &str, template: Option<String>) -> Self {
        Self::new(template.unwrap_or_else(|| default_specs_template(name)))
    }
}

impl License {
    /// Write to the conventional license file name
    pub fn write_license(&self, fs: &dyn FileSystem, dir: &Path, force: bool) -> BitResult<bool> {
        self.write(fs, dir, DEFAULT_LICENSE_FILENAME, force)
    }
}

fn identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if upper {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
            upper = false;
        } else {
            upper = !out.is_empty();
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

fn default_impl_template(name: &str) -> String {
    let ident = identifier(name);
    format!(
        "/**\n * {name}\n * @name {ident}\n * @returns {{undefined}}\n */\nmodule.exports = function {ident}() {{\n}};\n"
    )
}

fn default_specs_template(name: &str) -> String {
    let ident = identifier(name);
    format!(
        "const expect = require('chai').expect;\nconst {ident} = require(__impl__);\n\ndescribe('{name}', () => {{\n  it('should be a function', () => {{\n    expect({ident}).to.be.a('function');\n  }});\n}});\n"
    )
}

/// Serialized form of [`Dist`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistRecord {
    pub code: String,
    pub map: Option<Value>,
}

/// Compiled distribution of the implementation
#[derive(Debug, Clone, PartialEq)]
pub struct Dist {
    code: String,
    map: Option<Value>,
}

impl Dist {
    pub fn new(code: impl Into<String>, map: Option<Value>) -> Self {
        Self {
            code: code.into(),
            map,
        }
    }

    pub fn src(&self) -> &str {
        &self.code
    }

    pub fn map(&self) -> Option<&Value> {
        self.map.as_ref()
    }

    /// Write `dist/<impl_file>`, plus `dist/<impl_file>.map` when a map is present
    pub fn write(
        &self,
        fs: &dyn FileSystem,
        dir: &Path,
        impl_file: &str,
        force: bool,
    ) -> BitResult<bool> {
        let dist_dir = dir.join(DEFAULT_DIST_DIRNAME);
        let written = write_text(fs, &dist_dir.join(impl_file), &self.code, force)?;
        if let Some(map) = &self.map {
            let map_json = serde_json::to_string(map)?;
            write_text(fs, &dist_dir.join(format!("{impl_file}.map")), &map_json, force)?;
        }
        Ok(written)
    }

    pub fn serialize(&self) -> DistRecord {
        DistRecord {
            code: self.code.clone(),
            map: self.map.clone(),
        }
    }

    pub fn deserialize(record: DistRecord) -> Self {
        Self::new(record.code, record.map)
    }
}

/// Serialized form of one misc file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiscRecord {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct MiscFile {
    name: String,
    source: Source,
}

impl MiscFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn src(&self) -> BitResult<&str> {
        self.source.src()
    }
}

/// Extra files shipped with a component
#[derive(Debug, Clone, Default)]
pub struct Misc {
    files: Vec<MiscFile>,
}

impl Misc {
    /// Reference files below `dir`; each keeps its name relative to `dir`
    pub fn load(fs: SharedFs, dir: &Path, names: &[String]) -> Self {
        let files = names
            .iter()
            .map(|name| MiscFile {
                name: name.clone(),
                source: Source::load(fs.clone(), dir.join(name)),
            })
            .collect();
        Self { files }
    }

    pub fn files(&self) -> &[MiscFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every file at its relative name; returns how many were written
    pub fn write(&self, fs: &dyn FileSystem, dir: &Path, force: bool) -> BitResult<usize> {
        let mut written = 0;
        for file in &self.files {
            if file.source.write(fs, dir, &file.name, force)? {
                written += 1;
            }
        }
        Ok(written)
    }

    pub fn serialize(&self) -> BitResult<Vec<MiscRecord>> {
        self.files
            .iter()
            .map(|file| {
                Ok(MiscRecord {
                    name: file.name.clone(),
                    content: file.src()?.to_string(),
                })
            })
            .collect()
    }

    pub fn deserialize(records: Vec<MiscRecord>) -> Self {
        let files = records
            .into_iter()
            .map(|record| MiscFile {
                name: record.name,
                source: Source::from_content(record.content),
            })
            .collect();
        Self { files }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fs::LocalFs;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn local() -> SharedFs {
        Arc::new(LocalFs::new())
    }

    #[test]
    fn unloaded_source_reads_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("impl.js");
        std::fs::write(&path, "first").unwrap();

        let source = Source::load(local(), &path);
        assert!(!source.is_loaded());
        assert_eq!(source.src().unwrap(), "first");
        assert!(source.is_loaded());

        std::fs::write(&path, "second").unwrap();
        assert_eq!(source.src().unwrap(), "first");
    }

    #[test]
    fn resolve_turns_path_into_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spec.js");
        std::fs::write(&path, "describe()").unwrap();

        let state = SourceState::Unloaded(path).resolve(&LocalFs::new()).unwrap();
        assert_eq!(state, SourceState::Loaded("describe()".to_string()));
    }

    #[test]
    fn missing_file_is_an_error() {
        let source = Source::load(local(), "/definitely/not/here/impl.js");
        assert!(source.src().is_err());
    }

    #[test]
    fn write_skips_existing_without_force() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        std::fs::write(dir.path().join("impl.js"), "old").unwrap();

        let written = Impl::new("new")
            .write(&fs, dir.path(), "impl.js", false)
            .unwrap();
        assert!(!written);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("impl.js")).unwrap(),
            "old"
        );

        assert!(Impl::new("new")
            .write(&fs, dir.path(), "impl.js", true)
            .unwrap());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("impl.js")).unwrap(),
            "new"
        );
    }

    #[test]
    fn dist_serializes_code_and_map() {
        let dist = Dist::new("var x=1;", None);
        let json = serde_json::to_value(dist.serialize()).unwrap();
        assert_eq!(json, serde_json::json!({"code": "var x=1;", "map": null}));
    }

    #[test]
    fn dist_writes_map_next_to_code() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        let dist = Dist::new("var x=1;", Some(serde_json::json!({"version": 3})));

        dist.write(&fs, dir.path(), "impl.js", true).unwrap();

        let dist_dir = dir.path().join(DEFAULT_DIST_DIRNAME);
        assert_eq!(
            std::fs::read_to_string(dist_dir.join("impl.js")).unwrap(),
            "var x=1;"
        );
        assert!(dist_dir.join("impl.js.map").exists());
    }

    #[test]
    fn misc_keeps_file_names() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "# foo").unwrap();

        let misc = Misc::load(local(), dir.path(), &["README.md".to_string()]);
        let records = misc.serialize().unwrap();
        assert_eq!(
            records,
            vec![MiscRecord {
                name: "README.md".to_string(),
                content: "# foo".to_string(),
            }]
        );
    }

    #[test]
    fn misc_in_subdirectory_is_written_at_its_relative_name() {
        let from = tempdir().unwrap();
        std::fs::create_dir_all(from.path().join("lib")).unwrap();
        std::fs::write(from.path().join("lib").join("util.js"), "exports.u = 1;").unwrap();

        let misc = Misc::load(local(), from.path(), &["lib/util.js".to_string()]);
        assert_eq!(misc.files()[0].name(), "lib/util.js");

        let to = tempdir().unwrap();
        assert_eq!(misc.write(&LocalFs::new(), to.path(), false).unwrap(), 1);
        assert_eq!(
            std::fs::read_to_string(to.path().join("lib").join("util.js")).unwrap(),
            "exports.u = 1;"
        );
        assert!(!to.path().join("util.js").exists());
    }

    #[test]
    fn default_templates_reference_component_name() {
        let impl_src = Impl::create("is-string", None).serialize().unwrap();
        assert!(impl_src.contains("function isString()"));

        let specs_src = Specs::create("is-string", None).serialize().unwrap();
        assert!(specs_src.contains("describe('is-string'"));
    }

    #[test]
    fn plugin_template_wins_over_default() {
        let created = Impl::create("foo", Some("custom".to_string()));
        assert_eq!(created.src().unwrap(), "custom");
    }

    #[test]
    fn blank_license_is_detected() {
        assert!(License::new("  \n").is_blank().unwrap());
        assert!(!License::new("MIT").is_blank().unwrap());
    }
}
