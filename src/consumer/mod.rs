//! Consumer - a project working directory that authors components
//!
//! Components under development live in
//! `<root>/inline_components/<box>/<name>/`, next to a root `bit.json`
//! holding project-wide defaults.

mod bit_json;

use std::path::{Path, PathBuf};

pub use bit_json::{BitJson, ConsumerBitJson};

use crate::constants::INLINE_COMPONENTS_DIRNAME;
use crate::domain::ports::SharedFs;
use crate::error::BitResult;

#[derive(Debug, Clone)]
pub struct Consumer {
    root: PathBuf,
    bit_json: ConsumerBitJson,
    fs: SharedFs,
}

impl Consumer {
    pub fn new(fs: SharedFs, root: impl Into<PathBuf>, bit_json: ConsumerBitJson) -> Self {
        Self {
            root: root.into(),
            bit_json,
            fs,
        }
    }

    /// Open a consumer at `root`; a missing root `bit.json` means defaults
    pub fn load(fs: SharedFs, root: impl Into<PathBuf>) -> BitResult<Self> {
        let root = root.into();
        let bit_json = BitJson::load_consumer(fs.as_ref(), &root)?;
        Ok(Self::new(fs, root, bit_json))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File system the consumer's working directories live on
    pub fn fs(&self) -> &SharedFs {
        &self.fs
    }

    pub fn bit_json(&self) -> &ConsumerBitJson {
        &self.bit_json
    }

    /// Working directory of an inline component
    pub fn inline_dir(&self, box_name: &str, name: &str) -> PathBuf {
        self.root
            .join(INLINE_COMPONENTS_DIRNAME)
            .join(box_name)
            .join(name)
    }
}
