//! BitId value object - identifies one component (version)
//!
//! Canonical form is `[scope/]box/name[@version]`, e.g. `myscope/utils/foo@1`.
//! A bare `name` parses into the default box.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BOX_NAME, ID_DELIMITER, NO_PLUGIN_TYPE, VERSION_DELIMITER};
use crate::error::{BitError, BitResult};

/// Immutable identity of a component
///
/// Field-wise equality coincides with equality of the canonical strings,
/// since every segment is validated to exclude the delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BitId {
    scope: Option<String>,
    box_name: String,
    name: String,
    version: Option<String>,
}

impl BitId {
    /// Create an id, validating every segment
    pub fn new(
        scope: Option<&str>,
        box_name: &str,
        name: &str,
        version: Option<&str>,
    ) -> BitResult<Self> {
        let display = render(scope, box_name, name, version);
        if let Some(scope) = scope {
            validate_segment(&display, "scope", scope)?;
        }
        validate_segment(&display, "box", box_name)?;
        validate_segment(&display, "name", name)?;
        if let Some(version) = version {
            validate_segment(&display, "version", version)?;
        }

        Ok(Self {
            scope: scope.map(str::to_string),
            box_name: box_name.to_string(),
            name: name.to_string(),
            version: version.map(str::to_string),
        })
    }

    /// Parse a canonical id string
    pub fn parse(input: &str) -> BitResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(malformed(input, "id is empty"));
        }

        let (path, version) = match trimmed.rsplit_once(VERSION_DELIMITER) {
            Some((path, version)) => (path, Some(version)),
            None => (trimmed, None),
        };

        let segments: Vec<&str> = path.split(ID_DELIMITER).collect();
        match segments.as_slice() {
            [name] => Self::new(None, DEFAULT_BOX_NAME, name, version),
            [box_name, name] => Self::new(None, box_name, name, version),
            [scope, box_name, name] => Self::new(Some(scope), box_name, name, version),
            _ => Err(malformed(
                input,
                "expected [scope/]box/name with at most three segments",
            )),
        }
    }

    /// Parse a plugin reference from project config
    ///
    /// The `none` sentinel and empty strings mean "no plugin".
    pub fn parse_plugin(input: &str) -> BitResult<Option<Self>> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == NO_PLUGIN_TYPE {
            return Ok(None);
        }
        Self::parse(trimmed).map(Some)
    }

    /// Check that `name` can serve as the scope segment of an id
    pub fn validate_scope_name(name: &str) -> BitResult<()> {
        validate_segment(name, "scope", name)
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn box_name(&self) -> &str {
        &self.box_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Same id with a different version
    pub fn with_version(&self, version: Option<&str>) -> BitResult<Self> {
        Self::new(self.scope(), &self.box_name, &self.name, version)
    }

    /// `[scope/]box/name` without the version part
    pub fn to_string_without_version(&self) -> String {
        render(self.scope(), &self.box_name, &self.name, None)
    }
}

fn render(scope: Option<&str>, box_name: &str, name: &str, version: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(scope) = scope {
        out.push_str(scope);
        out.push(ID_DELIMITER);
    }
    out.push_str(box_name);
    out.push(ID_DELIMITER);
    out.push_str(name);
    if let Some(version) = version {
        out.push(VERSION_DELIMITER);
        out.push_str(version);
    }
    out
}

fn validate_segment(input: &str, field: &str, value: &str) -> BitResult<()> {
    if value.is_empty() {
        return Err(malformed(input, &format!("{field} is empty")));
    }
    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(malformed(
            input,
            &format!("{field} contains invalid character '{bad}'"),
        ));
    }
    Ok(())
}

fn malformed(input: &str, reason: &str) -> BitError {
    BitError::MalformedId {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for BitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(
            self.scope(),
            &self.box_name,
            &self.name,
            self.version(),
        ))
    }
}

impl FromStr for BitId {
    type Err = BitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BitId {
    type Error = BitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BitId> for String {
    fn from(id: BitId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_name_validation() {
        assert!(BitId::validate_scope_name("my-scope.v2").is_ok());
        assert!(matches!(
            BitId::validate_scope_name("my project"),
            Err(BitError::MalformedId { .. })
        ));
        assert!(BitId::validate_scope_name("").is_err());
    }

    #[test]
    fn parse_full_id() {
        let id = BitId::parse("myscope/utils/foo@1").unwrap();
        assert_eq!(id.scope(), Some("myscope"));
        assert_eq!(id.box_name(), "utils");
        assert_eq!(id.name(), "foo");
        assert_eq!(id.version(), Some("1"));
    }

    #[test]
    fn parse_without_scope_or_version() {
        let id = BitId::parse("utils/foo").unwrap();
        assert_eq!(id.scope(), None);
        assert_eq!(id.version(), None);
        assert_eq!(id.to_string(), "utils/foo");
    }

    #[test]
    fn parse_bare_name_uses_default_box() {
        let id = BitId::parse("foo").unwrap();
        assert_eq!(id.box_name(), DEFAULT_BOX_NAME);
        assert_eq!(id.to_string(), "global/foo");
    }

    #[test]
    fn canonical_round_trip() {
        for raw in ["myscope/utils/foo@1", "utils/foo", "s/b/n@latest", "b/n@0.1.2"] {
            let id = BitId::parse(raw).unwrap();
            assert_eq!(id.to_string(), raw);
            assert_eq!(BitId::parse(&id.to_string()).unwrap(), id);
        }
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        for raw in ["", "a/b/c/d", "utils//foo", "utils/foo@", "utils/fo o", "a/b@1@2"] {
            let err = BitId::parse(raw).unwrap_err();
            assert!(
                matches!(err, BitError::MalformedId { .. }),
                "expected MalformedId for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn parse_plugin_handles_sentinel() {
        assert_eq!(BitId::parse_plugin(NO_PLUGIN_TYPE).unwrap(), None);
        assert_eq!(BitId::parse_plugin("").unwrap(), None);
        let id = BitId::parse_plugin("envs/compilers/babel@2").unwrap();
        assert_eq!(id.unwrap().name(), "babel");
    }

    #[test]
    fn serde_uses_canonical_string() {
        let id = BitId::parse("myscope/utils/foo@1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"myscope/utils/foo@1\"");
        let back: BitId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn to_string_without_version_drops_version() {
        let id = BitId::parse("myscope/utils/foo@3").unwrap();
        assert_eq!(id.to_string_without_version(), "myscope/utils/foo");
    }
}
