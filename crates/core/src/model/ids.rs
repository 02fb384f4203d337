use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for building an id from a string
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdError {
    #[error("{kind} cannot be empty")]
    Empty { kind: &'static str },
}

/// Identifier of a top-level difficulty tier (e.g. `easy`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LevelId(String);

/// Identifier of a sub-level; doubles as the key in the persisted progress map.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubLevelId(String);

fn normalize(raw: impl Into<String>, kind: &'static str) -> Result<String, IdError> {
    let raw = raw.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty { kind });
    }
    Ok(trimmed.to_owned())
}

impl LevelId {
    pub(crate) fn builtin(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Creates a new `LevelId`
    ///
    /// # Errors
    ///
    /// Returns `IdError::Empty` if the id is blank.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        normalize(raw, "LevelId").map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SubLevelId {
    pub(crate) fn builtin(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Creates a new `SubLevelId`
    ///
    /// # Errors
    ///
    /// Returns `IdError::Empty` if the id is blank.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        normalize(raw, "SubLevelId").map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LevelId({})", self.0)
    }
}

impl fmt::Debug for SubLevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubLevelId({})", self.0)
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SubLevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LevelId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for SubLevelId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LevelId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for SubLevelId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LevelId> for String {
    fn from(id: LevelId) -> Self {
        id.0
    }
}

impl From<SubLevelId> for String {
    fn from(id: SubLevelId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_level_id_trims_input() {
        let id = SubLevelId::new("  easy-1 ").unwrap();
        assert_eq!(id.as_str(), "easy-1");
        assert_eq!(id.to_string(), "easy-1");
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert_eq!(
            "   ".parse::<LevelId>(),
            Err(IdError::Empty { kind: "LevelId" })
        );
        assert!(SubLevelId::new("").is_err());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = SubLevelId::new("m1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"m1\"");
    }
}
