//! BitIds value object - a component's dependency set
//!
//! Keeps insertion order for iteration; uniqueness is by canonical id string.

use serde_json::{Map, Value};

use super::bit_id::BitId;
use crate::constants::VERSION_DELIMITER;
use crate::error::BitResult;

/// Flat serialized form of a [`BitIds`]: `{ "<canonical id>": true }`
pub type PlainMapping = Map<String, Value>;

/// Ordered, de-duplicated set of [`BitId`]s
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitIds {
    ids: Vec<BitId>,
}

impl BitIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id; returns false (and changes nothing) if an equal id is present
    pub fn add(&mut self, id: BitId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: &BitId) -> bool {
        let canonical = id.to_string();
        self.ids.iter().any(|existing| existing.to_string() == canonical)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BitId> {
        self.ids.iter()
    }

    pub fn to_plain_mapping(&self) -> PlainMapping {
        self.ids
            .iter()
            .map(|id| (id.to_string(), Value::Bool(true)))
            .collect()
    }

    /// Rebuild a set from its plain mapping
    ///
    /// Also accepts the older `{ "box/name": "<version>" }` shape, in which the
    /// value carries the version.
    pub fn from_plain_mapping(mapping: &PlainMapping) -> BitResult<Self> {
        let mut ids = Self::new();
        for (key, value) in mapping {
            let id = match value {
                Value::String(version) if !key.contains(VERSION_DELIMITER) => {
                    BitId::parse(&format!("{key}{VERSION_DELIMITER}{version}"))?
                }
                _ => BitId::parse(key)?,
            };
            ids.add(id);
        }
        Ok(ids)
    }
}

impl FromIterator<BitId> for BitIds {
    fn from_iter<T: IntoIterator<Item = BitId>>(iter: T) -> Self {
        let mut ids = Self::new();
        for id in iter {
            ids.add(id);
        }
        ids
    }
}

impl<'a> IntoIterator for &'a BitIds {
    type Item = &'a BitId;
    type IntoIter = std::slice::Iter<'a, BitId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
