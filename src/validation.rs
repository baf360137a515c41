//! Validation and normalization.
//!
//! All validation failures share the single "invalid specification" error
//! variant and the check is fail-fast: the first unmet condition aborts with
//! a message naming the specific violation.

use thiserror::Error;

use crate::schema::{FieldValue, SCHEMA};
use crate::specification::Specification;
use crate::PRODUCER_VERSION;

#[derive(Debug, Error)]
pub enum SpecificationError {
    #[error("invalid specification: {0}")]
    InvalidSpecification(String),

    #[error("invalid version {0:?}")]
    InvalidVersion(String),

    #[error("invalid requirement {0:?}: {1}")]
    InvalidRequirement(String, #[source] semver::Error),

    #[error("wrong value type for field {0}")]
    WrongFieldType(&'static str),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpecificationError>;

impl Specification {
    /// Checks that the specification carries the current producer version
    /// and every required field, normalizing first.
    ///
    /// Fail-fast: returns the first violation found, so a caller fixing
    /// several issues must re-validate after each fix.
    pub fn validate(&mut self) -> Result<()> {
        self.normalize();

        match self.rubygems_version() {
            Some(version) if version == PRODUCER_VERSION => {}
            other => {
                return Err(SpecificationError::InvalidSpecification(format!(
                    "expected producer version {PRODUCER_VERSION}, was {}",
                    other.unwrap_or("unset"),
                )))
            }
        }

        for field in SCHEMA.iter().filter(|f| f.required) {
            if self.field_value(field.id) == FieldValue::Nil {
                return Err(SpecificationError::InvalidSpecification(format!(
                    "missing value for attribute {}",
                    field.name,
                )));
            }
        }

        if self.require_paths().is_empty() {
            return Err(SpecificationError::InvalidSpecification(
                "specification must have at least one require_path".to_string(),
            ));
        }

        Ok(())
    }

    /// Removes redundancies from the file lists and folds the extra rdoc
    /// files into `files`. Idempotent.
    pub fn normalize(&mut self) {
        let mut extra = self.extra_rdoc_files().to_vec();
        dedup_preserving(&mut extra);

        let mut files = self.files().to_vec();
        files.extend(extra.iter().cloned());
        dedup_preserving(&mut files);

        self.set_extra_rdoc_files(extra);
        self.set_files(files);
    }
}

fn dedup_preserving(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
