//! Version identifiers of the form `<major>.<minor>`.
//!
//! The major part is free text (it may itself contain dots, e.g. a branch
//! named `1.2`); the minor part is the decimal number after the last dot.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormatError;

#[derive(Debug, Clone)]
pub struct VersionIdentifier {
    major: String,
    minor: u32,
}

impl VersionIdentifier {
    pub fn new(major: impl Into<String>, minor: u32) -> Self {
        VersionIdentifier {
            major: major.into(),
            minor,
        }
    }

    /// Build from separate major and minor texts, as found in descriptor lists.
    pub fn from_parts(major: &str, minor: &str) -> Result<Self, FormatError> {
        Ok(VersionIdentifier::new(major, parse_minor(minor, minor)?))
    }

    /// Copy of `self`, with the minor part replaced when `minor` is given.
    pub fn with_minor(&self, minor: Option<u32>) -> Self {
        VersionIdentifier {
            major: self.major.clone(),
            minor: minor.unwrap_or(self.minor),
        }
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }
}

fn parse_minor(text: &str, whole: &str) -> Result<u32, FormatError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::new(
            "version",
            whole,
            "minor part must be a decimal number",
        ));
    }
    text.parse()
        .map_err(|_| FormatError::new("version", whole, "minor part is out of range"))
}

impl FromStr for VersionIdentifier {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s
            .rsplit_once('.')
            .ok_or_else(|| FormatError::new("version", s, "expected '<major>.<minor>'"))?;
        Ok(VersionIdentifier::new(major, parse_minor(minor, s)?))
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

// Equality, ordering and hashing all go through the canonical string so a
// version hashes and compares the same as its text.

impl PartialEq for VersionIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for VersionIdentifier {}

impl PartialEq<str> for VersionIdentifier {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for VersionIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl Hash for VersionIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl PartialOrd for VersionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

impl Serialize for VersionIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
