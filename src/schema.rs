//! Attribute schema: the static table of every field a specification holds.
//!
//! The table is declared once, in serialization order, and consulted by
//! construction (defaults), validation (required fields), equality and the
//! serializers. Singular aliases and read-only markers live here too, so the
//! whole field protocol is visible in one place.

use chrono::NaiveDate;

use crate::dependency::Dependency;
use crate::platform::Platform;
use crate::version::{VersionRequirement, VersionValue};
use crate::{CURRENT_SPECIFICATION_VERSION, PRODUCER_VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    RubygemsVersion,
    SpecificationVersion,
    Name,
    Version,
    Date,
    Summary,
    RequirePaths,
    Author,
    Email,
    Homepage,
    RubyforgeProject,
    Description,
    Autorequire,
    DefaultExecutable,
    Bindir,
    HasRdoc,
    RequiredRubyVersion,
    Platform,
    Files,
    TestFiles,
    LibraryStubs,
    RdocOptions,
    ExtraRdocFiles,
    Executables,
    Extensions,
    Requirements,
    Dependencies,
}

/// A field's current (or default) value, in a shape the schema-driven
/// machinery can compare and render without knowing the field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Nil,
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
    Version(VersionValue),
    Requirement(VersionRequirement),
    Date(NaiveDate),
    Platform(Platform),
    Dependencies(Vec<Dependency>),
}

/// Default value declaration; materialized per instance so no two records
/// share a backing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Nil,
    ProducerVersion,
    SpecVersion,
    Str(&'static str),
    Bool(bool),
    List(&'static [&'static str]),
    EmptyList,
    DefaultRequirement,
    RubyPlatform,
    NoDependencies,
}

impl FieldDefault {
    pub fn materialize(&self) -> FieldValue {
        match self {
            FieldDefault::Nil => FieldValue::Nil,
            FieldDefault::ProducerVersion => FieldValue::Str(PRODUCER_VERSION.to_string()),
            FieldDefault::SpecVersion => FieldValue::Int(CURRENT_SPECIFICATION_VERSION),
            FieldDefault::Str(s) => FieldValue::Str((*s).to_string()),
            FieldDefault::Bool(b) => FieldValue::Bool(*b),
            FieldDefault::List(items) => {
                FieldValue::List(items.iter().map(|s| (*s).to_string()).collect())
            }
            FieldDefault::EmptyList => FieldValue::List(Vec::new()),
            FieldDefault::DefaultRequirement => {
                FieldValue::Requirement(VersionRequirement::default())
            }
            FieldDefault::RubyPlatform => FieldValue::Platform(Platform::Ruby),
            FieldDefault::NoDependencies => FieldValue::Dependencies(Vec::new()),
        }
    }
}

pub struct FieldSpec {
    pub id: FieldId,
    pub name: &'static str,
    pub required: bool,
    pub read_only: bool,
    /// Singular alias whose setter wraps one value in a one-element list.
    pub singular: Option<&'static str>,
    pub default: FieldDefault,
}

const fn field(id: FieldId, name: &'static str, default: FieldDefault) -> FieldSpec {
    FieldSpec {
        id,
        name,
        required: false,
        read_only: false,
        singular: None,
        default,
    }
}

const fn required(id: FieldId, name: &'static str, default: FieldDefault) -> FieldSpec {
    FieldSpec {
        id,
        name,
        required: true,
        read_only: false,
        singular: None,
        default,
    }
}

/// Every specification field, in declaration (= serialization) order.
pub const SCHEMA: &[FieldSpec] = &[
    required(
        FieldId::RubygemsVersion,
        "rubygems_version",
        FieldDefault::ProducerVersion,
    ),
    FieldSpec {
        id: FieldId::SpecificationVersion,
        name: "specification_version",
        required: true,
        read_only: true,
        singular: None,
        default: FieldDefault::SpecVersion,
    },
    required(FieldId::Name, "name", FieldDefault::Nil),
    required(FieldId::Version, "version", FieldDefault::Nil),
    required(FieldId::Date, "date", FieldDefault::Nil),
    required(FieldId::Summary, "summary", FieldDefault::Nil),
    FieldSpec {
        id: FieldId::RequirePaths,
        name: "require_paths",
        required: true,
        read_only: false,
        singular: Some("require_path"),
        default: FieldDefault::List(&["lib"]),
    },
    field(FieldId::Author, "author", FieldDefault::Nil),
    field(FieldId::Email, "email", FieldDefault::Nil),
    field(FieldId::Homepage, "homepage", FieldDefault::Nil),
    field(
        FieldId::RubyforgeProject,
        "rubyforge_project",
        FieldDefault::Nil,
    ),
    field(FieldId::Description, "description", FieldDefault::Nil),
    field(FieldId::Autorequire, "autorequire", FieldDefault::Nil),
    field(
        FieldId::DefaultExecutable,
        "default_executable",
        FieldDefault::Nil,
    ),
    field(FieldId::Bindir, "bindir", FieldDefault::Str("bin")),
    field(FieldId::HasRdoc, "has_rdoc", FieldDefault::Bool(false)),
    field(
        FieldId::RequiredRubyVersion,
        "required_ruby_version",
        FieldDefault::DefaultRequirement,
    ),
    field(FieldId::Platform, "platform", FieldDefault::RubyPlatform),
    field(FieldId::Files, "files", FieldDefault::EmptyList),
    FieldSpec {
        id: FieldId::TestFiles,
        name: "test_files",
        required: false,
        read_only: false,
        singular: Some("test_file"),
        default: FieldDefault::EmptyList,
    },
    field(
        FieldId::LibraryStubs,
        "library_stubs",
        FieldDefault::EmptyList,
    ),
    field(
        FieldId::RdocOptions,
        "rdoc_options",
        FieldDefault::EmptyList,
    ),
    field(
        FieldId::ExtraRdocFiles,
        "extra_rdoc_files",
        FieldDefault::EmptyList,
    ),
    FieldSpec {
        id: FieldId::Executables,
        name: "executables",
        required: false,
        read_only: false,
        singular: Some("executable"),
        default: FieldDefault::EmptyList,
    },
    field(FieldId::Extensions, "extensions", FieldDefault::EmptyList),
    field(
        FieldId::Requirements,
        "requirements",
        FieldDefault::EmptyList,
    ),
    FieldSpec {
        id: FieldId::Dependencies,
        name: "dependencies",
        required: false,
        read_only: true,
        singular: None,
        default: FieldDefault::NoDependencies,
    },
];

/// Looks a field up by its serialized name or singular alias.
pub fn by_name(name: &str) -> Option<&'static FieldSpec> {
    SCHEMA
        .iter()
        .find(|f| f.name == name || f.singular == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_lead_the_schema() {
        let required: Vec<_> = SCHEMA.iter().filter(|f| f.required).map(|f| f.name).collect();
        assert_eq!(
            required,
            vec![
                "rubygems_version",
                "specification_version",
                "name",
                "version",
                "date",
                "summary",
                "require_paths"
            ]
        );
    }

    #[test]
    fn test_read_only_fields() {
        let read_only: Vec<_> = SCHEMA.iter().filter(|f| f.read_only).map(|f| f.name).collect();
        assert_eq!(read_only, vec!["specification_version", "dependencies"]);
    }

    #[test]
    fn test_singular_alias_lookup() {
        assert_eq!(by_name("require_path").map(|f| f.name), Some("require_paths"));
        assert_eq!(by_name("executable").map(|f| f.name), Some("executables"));
        assert_eq!(by_name("test_file").map(|f| f.name), Some("test_files"));
        assert!(by_name("no_such_field").is_none());
    }

    #[test]
    fn test_mutable_defaults_materialize_fresh() {
        let a = FieldDefault::List(&["lib"]).materialize();
        let b = FieldDefault::List(&["lib"]).materialize();
        assert_eq!(a, b);
        if let (FieldValue::List(a), FieldValue::List(b)) = (a, b) {
            assert_ne!(a.as_ptr(), b.as_ptr());
        }
    }
}
