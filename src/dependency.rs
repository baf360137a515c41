//! Dependency declarations: a package name plus a requirement list.

use serde::{Deserialize, Serialize};

use crate::validation::SpecificationError;
use crate::version::{VersionRequirement, VersionValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    name: String,
    requirements: Vec<VersionRequirement>,
}

impl Dependency {
    /// Builds a dependency; an empty requirement list falls back to the
    /// default "> 0.0.0" requirement.
    pub fn new(name: impl Into<String>, requirements: Vec<VersionRequirement>) -> Self {
        let requirements = if requirements.is_empty() {
            vec![VersionRequirement::default()]
        } else {
            requirements
        };
        Self {
            name: name.into(),
            requirements,
        }
    }

    /// Builds a dependency from raw requirement strings.
    pub fn parse(name: impl Into<String>, requirements: &[&str]) -> Result<Self, SpecificationError> {
        let parsed = requirements
            .iter()
            .map(|r| VersionRequirement::parse(r))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, parsed))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirements(&self) -> &[VersionRequirement] {
        &self.requirements
    }

    /// Raw requirement strings, in declaration order.
    pub fn requirements_list(&self) -> Vec<String> {
        self.requirements
            .iter()
            .map(|r| r.as_str().to_string())
            .collect()
    }

    /// True iff `version` satisfies every requirement.
    pub fn matched_by(&self, version: &VersionValue) -> bool {
        self.requirements.iter().all(|r| r.satisfied_by(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_requirements_default() {
        let dep = Dependency::new("rake", vec![]);
        assert_eq!(dep.requirements_list(), vec!["> 0.0.0".to_string()]);
    }

    #[test]
    fn test_all_requirements_must_match() {
        let dep = Dependency::parse("jabber4r", &["> 0.1", "<= 0.5"]).unwrap();
        assert!(dep.matched_by(&VersionValue::parse("0.3").unwrap()));
        assert!(!dep.matched_by(&VersionValue::parse("0.6").unwrap()));
    }

    #[test]
    fn test_bad_requirement_rejected() {
        assert!(Dependency::parse("rake", &["not a requirement"]).is_err());
    }
}
