//! Version values and requirement constraints, backed by semver.
//!
//! Package versions are not always strict semver ("1.0" is common), so
//! `VersionValue` keeps the raw form for display and pads missing segments
//! for comparison. `VersionRequirement` accepts the pessimistic operator
//! `~>` and expands it to its explicit bounds before parsing ("~> 1.2"
//! means ">= 1.2, < 2.0", which is not what semver's `~` does).

use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation::SpecificationError;

/// Requirement applied to dependencies declared without one.
pub const DEFAULT_REQUIREMENT: &str = "> 0.0.0";

static DEFAULT_REQ: Lazy<semver::VersionReq> = Lazy::new(|| {
    semver::VersionReq::parse(DEFAULT_REQUIREMENT).expect("default requirement is well-formed")
});

/// A concrete package version.
///
/// Comparison and equality go through the parsed semver form, so
/// `"1.0" == "1.0.0"`. Display and serialization keep the raw input.
#[derive(Debug, Clone)]
pub struct VersionValue {
    raw: String,
    parsed: semver::Version,
}

impl VersionValue {
    pub fn parse(input: &str) -> Result<Self, SpecificationError> {
        let raw = input.trim().to_string();
        if raw.is_empty() {
            return Err(SpecificationError::InvalidVersion(raw));
        }
        if let Ok(parsed) = semver::Version::parse(&raw) {
            return Ok(Self { raw, parsed });
        }
        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() > 3
            || parts
                .iter()
                .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(SpecificationError::InvalidVersion(raw));
        }
        let mut segments = [0u64; 3];
        for (i, part) in parts.iter().enumerate() {
            segments[i] = part
                .parse()
                .map_err(|_| SpecificationError::InvalidVersion(raw.clone()))?;
        }
        Ok(Self {
            parsed: semver::Version::new(segments[0], segments[1], segments[2]),
            raw,
        })
    }

    pub fn semver(&self) -> &semver::Version {
        &self.parsed
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for VersionValue {
    fn eq(&self, other: &Self) -> bool {
        self.parsed == other.parsed
    }
}

impl Eq for VersionValue {}

impl PartialOrd for VersionValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed.cmp(&other.parsed)
    }
}

impl From<semver::Version> for VersionValue {
    fn from(parsed: semver::Version) -> Self {
        Self {
            raw: parsed.to_string(),
            parsed,
        }
    }
}

impl Serialize for VersionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for VersionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        VersionValue::parse(&raw).map_err(D::Error::custom)
    }
}

/// A version-range constraint ("> 1.0", "~> 2.3", ">= 1.0, < 2.0").
///
/// Satisfaction is delegated to `semver::VersionReq`; equality compares the
/// parsed requirement, so whitespace variants of the same constraint are
/// equal.
#[derive(Debug, Clone)]
pub struct VersionRequirement {
    raw: String,
    req: semver::VersionReq,
}

impl VersionRequirement {
    pub fn parse(input: &str) -> Result<Self, SpecificationError> {
        let raw = input.trim().to_string();
        if raw.is_empty() {
            return Ok(Self::default());
        }
        let translated = raw
            .split(',')
            .map(translate_clause)
            .collect::<Vec<_>>()
            .join(", ");
        let req = semver::VersionReq::parse(&translated)
            .map_err(|e| SpecificationError::InvalidRequirement(raw.clone(), e))?;
        Ok(Self { raw, req })
    }

    pub fn satisfied_by(&self, version: &VersionValue) -> bool {
        self.req.matches(version.semver())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Expands a pessimistic clause to its bounds: "~> 1.2" becomes
/// ">=1.2, <2", "~> 1.2.3" becomes ">=1.2.3, <1.3". Partial upper bounds
/// are zero-filled by the semver parser. Anything else passes through.
fn translate_clause(clause: &str) -> String {
    let clause = clause.trim();
    let Some(version) = clause.strip_prefix("~>").map(str::trim) else {
        return clause.to_string();
    };
    let segments: Result<Vec<u64>, _> = version.split('.').map(str::parse).collect();
    match segments.as_deref() {
        Ok([]) | Err(_) => clause.to_string(),
        Ok([major]) => format!(">={version}, <{}", major + 1),
        Ok(segments) => {
            let mut upper = segments[..segments.len() - 1].to_vec();
            if let Some(last) = upper.last_mut() {
                *last += 1;
            }
            let upper: Vec<String> = upper.iter().map(u64::to_string).collect();
            format!(">={version}, <{}", upper.join("."))
        }
    }
}

impl Default for VersionRequirement {
    fn default() -> Self {
        Self {
            raw: DEFAULT_REQUIREMENT.to_string(),
            req: DEFAULT_REQ.clone(),
        }
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for VersionRequirement {
    fn eq(&self, other: &Self) -> bool {
        self.req == other.req
    }
}

impl Eq for VersionRequirement {}

impl Serialize for VersionRequirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for VersionRequirement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        VersionRequirement::parse(&raw).map_err(D::Error::custom)
    }
}
