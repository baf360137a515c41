//! Registry of loaded specifications and the reverse-dependency query.
//!
//! The registry is an explicit value owned by whatever orchestrates record
//! loading; nothing here is process-global, so tests and embedders build
//! isolated registries. Records are appended at construction time via
//! [`Registry::create`] or loaded from disk and never removed.

use std::fs;
use std::path::Path;

use crate::dependency::Dependency;
use crate::serialize::parse_ruby;
use crate::specification::Specification;
use crate::validation::Result;

#[derive(Debug, Default)]
pub struct Registry {
    records: Vec<Specification>,
}

/// One hit of the reverse-dependency query: a record that depends on the
/// queried specification, the dependency it declares, and every registry
/// record satisfying that same dependency.
#[derive(Debug)]
pub struct DependentRecord<'a> {
    pub dependent: &'a Specification,
    pub dependency: &'a Dependency,
    pub satisfiers: Vec<&'a Specification>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Constructs a specification (defaults applied, customization callback
    /// run) and appends it to this registry.
    pub fn create(&mut self, customize: impl FnOnce(&mut Specification)) -> &Specification {
        self.records.push(Specification::new(customize));
        &self.records[self.records.len() - 1]
    }

    pub fn push(&mut self, spec: Specification) {
        self.records.push(spec);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Specification> {
        self.records.iter()
    }

    /// First record matching `name` at exactly `version`.
    pub fn find(&self, name: &str, version: &str) -> Option<&Specification> {
        self.records.iter().find(|spec| {
            spec.name() == Some(name)
                && spec
                    .version()
                    .map(|v| v.as_str() == version)
                    .unwrap_or(false)
        })
    }

    /// Loads every `*.gemspec` file in `dir` (canonical text form), marking
    /// each record loaded and recording its origin path. Files that fail to
    /// read or parse are skipped.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let mut registry = Self::new();
        if !dir.exists() {
            return Ok(registry);
        }
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |e| e == "gemspec") {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(mut spec) = parse_ruby(&content) {
                        spec.set_loaded(true);
                        spec.set_loaded_from(&path);
                        registry.push(spec);
                    }
                }
            }
        }
        Ok(registry)
    }

    /// Every record in this registry that depends on `spec`, together with
    /// the dependency and all records that could satisfy it. Full nested
    /// scan, O(records x dependencies x records); fine for the small
    /// registries this model serves.
    pub fn dependent_records<'a>(&'a self, spec: &Specification) -> Vec<DependentRecord<'a>> {
        let mut out = Vec::new();
        for record in &self.records {
            for dependency in record.dependencies() {
                if spec.satisfies_requirement(dependency) {
                    let satisfiers = self
                        .records
                        .iter()
                        .filter(|candidate| candidate.satisfies_requirement(dependency))
                        .collect();
                    out.push(DependentRecord {
                        dependent: record,
                        dependency,
                        satisfiers,
                    });
                }
            }
        }
        out
    }
}
