//! The specification record: one package's metadata.
//!
//! A record is built through [`Specification::new`] (or
//! `Registry::create`), which applies every schema default and yields the
//! record to a customization callback:
//!
//! ```
//! use gemspec_core::Specification;
//!
//! let spec = Specification::new(|s| {
//!     s.set_name("rfoo");
//!     s.set_version("1.0").unwrap();
//!     s.set_summary("Example package specification");
//! });
//! assert_eq!(spec.full_name(), "rfoo-1.0");
//! ```
//!
//! Setters for version, platform, date, summary/description and
//! required_ruby_version coerce their input; everything else stores
//! verbatim. `dependencies` and `specification_version` have no public
//! setters and change only through `add_dependency` / internal assignment.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dependency::Dependency;
use crate::platform::{self, Platform};
use crate::schema::{FieldId, FieldValue, SCHEMA};
use crate::validation::{Result, SpecificationError};
use crate::version::{VersionRequirement, VersionValue};
use crate::{CURRENT_SPECIFICATION_VERSION, PRODUCER_VERSION};

/// Callback invoked when a deprecated accessor is used; receives the old
/// and the replacement field name.
pub type DeprecationWarn<'a> = &'a mut dyn FnMut(&str, &str);

#[derive(Debug, Clone)]
pub struct Specification {
    rubygems_version: Option<String>,
    specification_version: i64,
    name: Option<String>,
    version: Option<VersionValue>,
    date: NaiveDate,
    summary: Option<String>,
    require_paths: Vec<String>,
    author: Option<String>,
    email: Option<String>,
    homepage: Option<String>,
    rubyforge_project: Option<String>,
    description: Option<String>,
    autorequire: Option<String>,
    default_executable: Option<String>,
    bindir: String,
    has_rdoc: bool,
    required_ruby_version: VersionRequirement,
    platform: Platform,
    files: Vec<String>,
    test_files: Vec<String>,
    library_stubs: Vec<String>,
    rdoc_options: Vec<String>,
    extra_rdoc_files: Vec<String>,
    executables: Vec<String>,
    extensions: Vec<String>,
    requirements: Vec<String>,
    dependencies: Vec<Dependency>,

    // Transients, set by the loader; never compared or serialized.
    loaded: bool,
    loaded_from: Option<PathBuf>,
}

/// Input accepted by the version setter.
pub enum VersionInput {
    Value(VersionValue),
    Raw(String),
}

impl From<VersionValue> for VersionInput {
    fn from(value: VersionValue) -> Self {
        VersionInput::Value(value)
    }
}

impl From<&str> for VersionInput {
    fn from(raw: &str) -> Self {
        VersionInput::Raw(raw.to_string())
    }
}

impl From<String> for VersionInput {
    fn from(raw: String) -> Self {
        VersionInput::Raw(raw)
    }
}

/// Input accepted by the date setter.
pub enum DateInput {
    Date(NaiveDate),
    Raw(String),
    Ymd(i32, u32, u32),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(raw: &str) -> Self {
        DateInput::Raw(raw.to_string())
    }
}

impl From<String> for DateInput {
    fn from(raw: String) -> Self {
        DateInput::Raw(raw)
    }
}

impl From<(i32, u32, u32)> for DateInput {
    fn from((y, m, d): (i32, u32, u32)) -> Self {
        DateInput::Ymd(y, m, d)
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

static HYPHEN_WRAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w-)\n[ \t]*(\w)").expect("hyphen-wrap pattern is well-formed"));
static LINE_WRAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*").expect("line-wrap pattern is well-formed"));

/// Single-line normalization for summary and description: trim, rejoin
/// hyphen-broken words split across a wrap, collapse remaining wraps plus
/// indentation to one space.
fn normalize_text(input: &str) -> String {
    let trimmed = input.trim();
    let rejoined = HYPHEN_WRAP.replace_all(trimmed, "${1}${2}");
    LINE_WRAP.replace_all(&rejoined, " ").into_owned()
}

macro_rules! string_accessors {
    ($(($getter:ident, $setter:ident)),* $(,)?) => {
        $(
            pub fn $getter(&self) -> Option<&str> {
                self.$getter.as_deref()
            }

            pub fn $setter(&mut self, value: impl Into<String>) {
                self.$getter = Some(value.into());
            }
        )*
    };
}

macro_rules! list_accessors {
    ($(($getter:ident, $setter:ident)),* $(,)?) => {
        $(
            pub fn $getter(&self) -> &[String] {
                &self.$getter
            }

            pub fn $setter<I, S>(&mut self, value: I)
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                self.$getter = value.into_iter().map(Into::into).collect();
            }
        )*
    };
}

impl Specification {
    /// Applies every schema default, then yields the record for
    /// customization. The `date` default coerces to today, as the date
    /// setter never leaves the field unset.
    pub fn new(customize: impl FnOnce(&mut Specification)) -> Self {
        let mut spec = Self {
            rubygems_version: Some(PRODUCER_VERSION.to_string()),
            specification_version: CURRENT_SPECIFICATION_VERSION,
            name: None,
            version: None,
            date: today(),
            summary: None,
            require_paths: vec!["lib".to_string()],
            author: None,
            email: None,
            homepage: None,
            rubyforge_project: None,
            description: None,
            autorequire: None,
            default_executable: None,
            bindir: "bin".to_string(),
            has_rdoc: false,
            required_ruby_version: VersionRequirement::default(),
            platform: Platform::Ruby,
            files: Vec::new(),
            test_files: Vec::new(),
            library_stubs: Vec::new(),
            rdoc_options: Vec::new(),
            extra_rdoc_files: Vec::new(),
            executables: Vec::new(),
            extensions: Vec::new(),
            requirements: Vec::new(),
            dependencies: Vec::new(),
            loaded: false,
            loaded_from: None,
        };
        customize(&mut spec);
        spec
    }

    // --- Plain accessors ---

    string_accessors! {
        (rubygems_version, set_rubygems_version),
        (name, set_name),
        (author, set_author),
        (email, set_email),
        (homepage, set_homepage),
        (rubyforge_project, set_rubyforge_project),
        (autorequire, set_autorequire),
    }

    list_accessors! {
        (require_paths, set_require_paths),
        (files, set_files),
        (test_files, set_test_files),
        (library_stubs, set_library_stubs),
        (rdoc_options, set_rdoc_options),
        (extra_rdoc_files, set_extra_rdoc_files),
        (executables, set_executables),
        (extensions, set_extensions),
        (requirements, set_requirements),
    }

    pub fn specification_version(&self) -> i64 {
        self.specification_version
    }

    pub fn bindir(&self) -> &str {
        &self.bindir
    }

    pub fn set_bindir(&mut self, bindir: impl Into<String>) {
        self.bindir = bindir.into();
    }

    pub fn set_has_rdoc(&mut self, has_rdoc: bool) {
        self.has_rdoc = has_rdoc;
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    // --- Coercing setters ---

    /// Stores a version value, parsing raw input through [`VersionValue`].
    pub fn set_version(&mut self, version: impl Into<VersionInput>) -> Result<()> {
        self.version = Some(match version.into() {
            VersionInput::Value(value) => value,
            VersionInput::Raw(raw) => VersionValue::parse(&raw)?,
        });
        Ok(())
    }

    pub fn version(&self) -> Option<&VersionValue> {
        self.version.as_ref()
    }

    /// Stores the platform, resolving the "current" sentinel to the host
    /// platform at assignment time.
    pub fn set_platform(&mut self, input: impl Into<Platform>) {
        self.platform = match input.into() {
            Platform::Named(name) if name == platform::CURRENT => platform::host(),
            other => other,
        };
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn set_required_ruby_version(&mut self, requirement: impl AsRef<str>) -> Result<()> {
        self.required_ruby_version = VersionRequirement::parse(requirement.as_ref())?;
        Ok(())
    }

    pub fn required_ruby_version(&self) -> &VersionRequirement {
        &self.required_ruby_version
    }

    /// Stores a date. Raw strings parse as YYYY-MM-DD; unparsable or
    /// out-of-range input falls back to today. Never leaves the field unset.
    pub fn set_date(&mut self, input: impl Into<DateInput>) {
        self.date = match input.into() {
            DateInput::Date(date) => date,
            DateInput::Raw(raw) => {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").unwrap_or_else(|_| today())
            }
            DateInput::Ymd(y, m, d) => NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(today),
        };
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn set_summary(&mut self, summary: impl AsRef<str>) {
        self.summary = Some(normalize_text(summary.as_ref()));
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn set_description(&mut self, description: impl AsRef<str>) {
        self.description = Some(normalize_text(description.as_ref()));
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The explicit default executable if one was set, else the sole entry
    /// of `executables`, else none.
    pub fn default_executable(&self) -> Option<&str> {
        if let Some(explicit) = self.default_executable.as_deref() {
            return Some(explicit);
        }
        if self.executables.len() == 1 {
            return self.executables.first().map(String::as_str);
        }
        None
    }

    pub fn set_default_executable(&mut self, executable: impl Into<String>) {
        self.default_executable = Some(executable.into());
    }

    /// The stored value only, without the sole-executable fallback. The
    /// canonical serializer omits the derived value.
    pub(crate) fn explicit_default_executable(&self) -> Option<&str> {
        self.default_executable.as_deref()
    }

    // --- Singular aliases (replace the whole list with one element) ---

    pub fn set_require_path(&mut self, path: impl Into<String>) {
        self.require_paths = vec![path.into()];
    }

    pub fn set_executable(&mut self, executable: impl Into<String>) {
        self.executables = vec![executable.into()];
    }

    pub fn set_test_file(&mut self, file: impl Into<String>) {
        self.test_files = vec![file.into()];
    }

    // --- Deprecated shim ---

    /// Deprecated: use `test_files`. Returns the first test file and
    /// reports the deprecation through `warn`.
    pub fn test_suite_file(&self, warn: DeprecationWarn<'_>) -> Option<&str> {
        warn("test_suite_file", "test_files");
        self.test_files.first().map(String::as_str)
    }

    /// Deprecated: use `test_files`. Appends to `test_files` and reports
    /// the deprecation through `warn`.
    pub fn set_test_suite_file(&mut self, file: impl Into<String>, warn: DeprecationWarn<'_>) {
        warn("test_suite_file", "test_files");
        self.test_files.push(file.into());
    }

    // --- Transients (loader collaborator) ---

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }

    pub fn set_loaded_from(&mut self, path: impl Into<PathBuf>) {
        self.loaded_from = Some(path.into());
    }

    // --- Predicates ---

    pub fn has_rdoc(&self) -> bool {
        self.has_rdoc
    }

    pub fn has_unit_tests(&self) -> bool {
        !self.test_files.is_empty()
    }

    /// Deprecated alias of [`Specification::has_unit_tests`].
    pub fn has_test_suite(&self) -> bool {
        self.has_unit_tests()
    }

    // --- Names and paths ---

    /// `name-version`, with a `-platform` suffix unless the platform is the
    /// pure default.
    pub fn full_name(&self) -> String {
        let name = self.name.as_deref().unwrap_or_default();
        let version = self
            .version
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        match &self.platform {
            Platform::Ruby => format!("{name}-{version}"),
            Platform::Named(platform) => format!("{name}-{version}-{platform}"),
        }
    }

    /// The installation root this record was loaded from: `loaded_from`
    /// with its last two path segments stripped. None when the loader never
    /// supplied a path.
    pub fn installation_path(&self) -> Option<PathBuf> {
        self.loaded_from
            .as_deref()?
            .parent()?
            .parent()
            .map(Path::to_path_buf)
    }

    /// Installation root plus `gems/<full_name>`.
    pub fn full_gem_path(&self) -> Option<PathBuf> {
        Some(self.installation_path()?.join("gems").join(self.full_name()))
    }

    // --- Dependencies ---

    pub fn add_dependency(&mut self, dependency: Dependency) {
        self.dependencies.push(dependency);
    }

    /// Declares a dependency on `name`; empty `requirements` defaults to
    /// "> 0.0.0".
    pub fn add_dependency_on(
        &mut self,
        name: impl Into<String>,
        requirements: &[&str],
    ) -> Result<()> {
        let dependency = Dependency::parse(name, requirements)?;
        self.dependencies.push(dependency);
        Ok(())
    }

    /// True iff this record's name matches the dependency's and its version
    /// satisfies every requirement.
    pub fn satisfies_requirement(&self, dependency: &Dependency) -> bool {
        match (&self.name, &self.version) {
            (Some(name), Some(version)) => {
                name == dependency.name() && dependency.matched_by(version)
            }
            _ => false,
        }
    }

    // --- Ordering ---

    /// Lexicographic ordering on (name, version), for stable sorting and
    /// display. Not `Ord`: record equality spans every schema field, so two
    /// records can compare `Equal` here without being equal.
    pub fn order(&self, other: &Self) -> Ordering {
        (self.name.as_deref(), &self.version).cmp(&(other.name.as_deref(), &other.version))
    }

    // --- Schema-driven field access ---

    /// The current value of a schema field, as seen through its public
    /// getter (so `default_executable` reports the derived value).
    pub fn field_value(&self, id: FieldId) -> FieldValue {
        fn opt(value: Option<&str>) -> FieldValue {
            value
                .map(|s| FieldValue::Str(s.to_string()))
                .unwrap_or(FieldValue::Nil)
        }

        match id {
            FieldId::RubygemsVersion => opt(self.rubygems_version()),
            FieldId::SpecificationVersion => FieldValue::Int(self.specification_version),
            FieldId::Name => opt(self.name()),
            FieldId::Version => self
                .version
                .clone()
                .map(FieldValue::Version)
                .unwrap_or(FieldValue::Nil),
            FieldId::Date => FieldValue::Date(self.date),
            FieldId::Summary => opt(self.summary()),
            FieldId::RequirePaths => FieldValue::List(self.require_paths.clone()),
            FieldId::Author => opt(self.author()),
            FieldId::Email => opt(self.email()),
            FieldId::Homepage => opt(self.homepage()),
            FieldId::RubyforgeProject => opt(self.rubyforge_project()),
            FieldId::Description => opt(self.description()),
            FieldId::Autorequire => opt(self.autorequire()),
            FieldId::DefaultExecutable => opt(self.default_executable()),
            FieldId::Bindir => FieldValue::Str(self.bindir.clone()),
            FieldId::HasRdoc => FieldValue::Bool(self.has_rdoc),
            FieldId::RequiredRubyVersion => {
                FieldValue::Requirement(self.required_ruby_version.clone())
            }
            FieldId::Platform => FieldValue::Platform(self.platform.clone()),
            FieldId::Files => FieldValue::List(self.files.clone()),
            FieldId::TestFiles => FieldValue::List(self.test_files.clone()),
            FieldId::LibraryStubs => FieldValue::List(self.library_stubs.clone()),
            FieldId::RdocOptions => FieldValue::List(self.rdoc_options.clone()),
            FieldId::ExtraRdocFiles => FieldValue::List(self.extra_rdoc_files.clone()),
            FieldId::Executables => FieldValue::List(self.executables.clone()),
            FieldId::Extensions => FieldValue::List(self.extensions.clone()),
            FieldId::Requirements => FieldValue::List(self.requirements.clone()),
            FieldId::Dependencies => FieldValue::Dependencies(self.dependencies.clone()),
        }
    }

    /// Assigns a schema field from a generic value, routing raw strings
    /// through the coercing setters. Internal: ignores read-only markers,
    /// which only bind external callers.
    pub(crate) fn assign_field(&mut self, id: FieldId, value: FieldValue) -> Result<()> {
        fn wrong(id: FieldId) -> SpecificationError {
            let name = SCHEMA
                .iter()
                .find(|f| f.id == id)
                .map(|f| f.name)
                .unwrap_or("unknown");
            SpecificationError::WrongFieldType(name)
        }

        match (id, value) {
            (FieldId::RubygemsVersion, FieldValue::Str(s)) => self.set_rubygems_version(s),
            (FieldId::SpecificationVersion, FieldValue::Int(v)) => self.specification_version = v,
            (FieldId::Name, FieldValue::Str(s)) => self.set_name(s),
            (FieldId::Version, FieldValue::Version(v)) => self.version = Some(v),
            (FieldId::Version, FieldValue::Str(s)) => self.set_version(s.as_str())?,
            (FieldId::Date, FieldValue::Date(d)) => self.set_date(d),
            (FieldId::Date, FieldValue::Str(s)) => self.set_date(s),
            (FieldId::Summary, FieldValue::Str(s)) => self.set_summary(s),
            (FieldId::RequirePaths, FieldValue::List(v)) => self.set_require_paths(v),
            (FieldId::Author, FieldValue::Str(s)) => self.set_author(s),
            (FieldId::Email, FieldValue::Str(s)) => self.set_email(s),
            (FieldId::Homepage, FieldValue::Str(s)) => self.set_homepage(s),
            (FieldId::RubyforgeProject, FieldValue::Str(s)) => self.set_rubyforge_project(s),
            (FieldId::Description, FieldValue::Str(s)) => self.set_description(s),
            (FieldId::Autorequire, FieldValue::Str(s)) => self.set_autorequire(s),
            (FieldId::DefaultExecutable, FieldValue::Str(s)) => self.set_default_executable(s),
            (FieldId::Bindir, FieldValue::Str(s)) => self.set_bindir(s),
            (FieldId::HasRdoc, FieldValue::Bool(b)) => self.set_has_rdoc(b),
            (FieldId::RequiredRubyVersion, FieldValue::Requirement(r)) => {
                self.required_ruby_version = r
            }
            (FieldId::RequiredRubyVersion, FieldValue::Str(s)) => {
                self.set_required_ruby_version(s)?
            }
            (FieldId::Platform, FieldValue::Platform(p)) => self.set_platform(p),
            (FieldId::Platform, FieldValue::Str(s)) => self.set_platform(s),
            (FieldId::Files, FieldValue::List(v)) => self.set_files(v),
            (FieldId::TestFiles, FieldValue::List(v)) => self.set_test_files(v),
            (FieldId::LibraryStubs, FieldValue::List(v)) => self.set_library_stubs(v),
            (FieldId::RdocOptions, FieldValue::List(v)) => self.set_rdoc_options(v),
            (FieldId::ExtraRdocFiles, FieldValue::List(v)) => self.set_extra_rdoc_files(v),
            (FieldId::Executables, FieldValue::List(v)) => self.set_executables(v),
            (FieldId::Extensions, FieldValue::List(v)) => self.set_extensions(v),
            (FieldId::Requirements, FieldValue::List(v)) => self.set_requirements(v),
            (FieldId::Dependencies, FieldValue::Dependencies(v)) => self.dependencies = v,
            (id, _) => return Err(wrong(id)),
        }
        Ok(())
    }
}

impl Default for Specification {
    fn default() -> Self {
        Self::new(|_| {})
    }
}

/// Field-wise equality over every schema-declared field; transients are
/// not compared.
impl PartialEq for Specification {
    fn eq(&self, other: &Self) -> bool {
        SCHEMA
            .iter()
            .all(|f| self.field_value(f.id) == other.field_value(f.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDefault;

    #[test]
    fn test_defaults_match_schema() {
        let spec = Specification::default();
        for field in SCHEMA {
            let current = spec.field_value(field.id);
            match field.id {
                // The date setter coerces the nil default to today.
                FieldId::Date => assert_eq!(current, FieldValue::Date(today())),
                _ => assert_eq!(
                    current,
                    field.default.materialize(),
                    "default mismatch for {}",
                    field.name
                ),
            }
        }
        assert!(!spec.loaded());
        assert_eq!(spec.require_paths(), ["lib"]);
    }

    #[test]
    fn test_schema_defaults_are_well_typed() {
        let mut spec = Specification::default();
        for field in SCHEMA {
            if field.default == FieldDefault::Nil {
                continue;
            }
            spec.assign_field(field.id, field.default.materialize())
                .unwrap_or_else(|e| panic!("default for {} rejected: {e}", field.name));
        }
    }

    #[test]
    fn test_version_coercion() {
        let mut spec = Specification::default();
        spec.set_version("1.2").unwrap();
        assert_eq!(spec.version().unwrap().as_str(), "1.2");
        assert!(spec.set_version("not-a-version").is_err());

        let value = VersionValue::parse("2.0.1").unwrap();
        spec.set_version(value.clone()).unwrap();
        assert_eq!(spec.version(), Some(&value));
    }

    #[test]
    fn test_platform_current_resolves_to_host() {
        let mut spec = Specification::default();
        spec.set_platform("current");
        assert_eq!(spec.platform(), &platform::host());

        spec.set_platform("mswin32");
        assert_eq!(spec.platform(), &Platform::Named("mswin32".to_string()));

        spec.set_platform("ruby");
        assert!(spec.platform().is_ruby());
    }

    #[test]
    fn test_date_coercion_falls_back_to_today() {
        let mut spec = Specification::default();
        spec.set_date("2004-03-29");
        assert_eq!(spec.date(), NaiveDate::from_ymd_opt(2004, 3, 29).unwrap());

        spec.set_date("last tuesday");
        assert_eq!(spec.date(), today());

        spec.set_date((2004, 2, 30)); // not a real date
        assert_eq!(spec.date(), today());

        spec.set_date((2004, 2, 29));
        assert_eq!(spec.date(), NaiveDate::from_ymd_opt(2004, 2, 29).unwrap());
    }

    #[test]
    fn test_summary_normalization() {
        let mut spec = Specification::default();
        spec.set_summary("  A well-\n    known package\n  with wrapped text  ");
        assert_eq!(
            spec.summary(),
            Some("A well-known package with wrapped text")
        );
    }

    #[test]
    fn test_default_executable_rule() {
        let mut spec = Specification::default();
        assert_eq!(spec.default_executable(), None);

        spec.set_executables(["foo"]);
        assert_eq!(spec.default_executable(), Some("foo"));

        spec.set_executables(["foo", "bar"]);
        assert_eq!(spec.default_executable(), None);

        spec.set_default_executable("bar");
        assert_eq!(spec.default_executable(), Some("bar"));
    }

    #[test]
    fn test_singular_aliases_replace_list() {
        let mut spec = Specification::default();
        spec.set_require_paths(["lib", "ext"]);
        spec.set_require_path("lib");
        assert_eq!(spec.require_paths(), ["lib"]);

        spec.set_executable("foo");
        assert_eq!(spec.executables(), ["foo"]);

        spec.set_test_file("test/ts_foo.rb");
        assert_eq!(spec.test_files(), ["test/ts_foo.rb"]);
    }

    #[test]
    fn test_test_suite_file_shim_warns() {
        let mut warnings = Vec::new();
        let mut warn = |old: &str, new: &str| warnings.push((old.to_string(), new.to_string()));

        let mut spec = Specification::default();
        spec.set_test_suite_file("test/ts_foo.rb", &mut warn);
        assert_eq!(spec.test_files(), ["test/ts_foo.rb"]);
        assert_eq!(spec.test_suite_file(&mut warn), Some("test/ts_foo.rb"));

        assert_eq!(
            warnings,
            vec![
                ("test_suite_file".to_string(), "test_files".to_string()),
                ("test_suite_file".to_string(), "test_files".to_string()),
            ]
        );
        assert!(spec.has_unit_tests());
        assert!(spec.has_test_suite());
    }

    #[test]
    fn test_full_name_platform_segment() {
        let mut spec = Specification::new(|s| {
            s.set_name("foo");
            s.set_version("1.0").unwrap();
        });
        assert_eq!(spec.full_name(), "foo-1.0");

        spec.set_platform("mswin32");
        assert_eq!(spec.full_name(), "foo-1.0-mswin32");

        spec.set_platform("ruby");
        assert_eq!(spec.full_name(), "foo-1.0");
    }

    #[test]
    fn test_paths_derive_from_loaded_from() {
        let mut spec = Specification::new(|s| {
            s.set_name("foo");
            s.set_version("1.0").unwrap();
        });
        assert_eq!(spec.installation_path(), None);

        spec.set_loaded_from("/opt/packages/specifications/foo-1.0.gemspec");
        assert_eq!(
            spec.installation_path(),
            Some(PathBuf::from("/opt/packages"))
        );
        assert_eq!(
            spec.full_gem_path(),
            Some(PathBuf::from("/opt/packages/gems/foo-1.0"))
        );
    }

    #[test]
    fn test_satisfies_requirement() {
        let spec = Specification::new(|s| {
            s.set_name("foo");
            s.set_version("1.2.0").unwrap();
        });

        let dep = Dependency::parse("foo", &["> 1.0", "< 2.0"]).unwrap();
        assert!(spec.satisfies_requirement(&dep));

        let wrong_name = Dependency::parse("bar", &["> 1.0", "< 2.0"]).unwrap();
        assert!(!spec.satisfies_requirement(&wrong_name));

        let wrong_range = Dependency::parse("foo", &["> 2.0"]).unwrap();
        assert!(!spec.satisfies_requirement(&wrong_range));
    }

    #[test]
    fn test_add_dependency_defaults_requirement() {
        let mut spec = Specification::default();
        spec.add_dependency_on("rake", &[]).unwrap();
        spec.add_dependency(Dependency::parse("jabber4r", &["> 0.1", "<= 0.5"]).unwrap());

        assert_eq!(spec.dependencies().len(), 2);
        assert_eq!(
            spec.dependencies()[0].requirements_list(),
            vec!["> 0.0.0".to_string()]
        );
    }

    #[test]
    fn test_equality_is_field_wise() {
        let a = Specification::new(|s| {
            s.set_name("foo");
            s.set_version("1.0").unwrap();
            s.set_summary("a package");
        });
        let mut b = Specification::new(|s| {
            s.set_name("foo");
            s.set_version("1.0").unwrap();
            s.set_summary("a package");
        });
        assert_eq!(a, b);

        b.set_files(["lib/foo.rb"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_order_by_name_then_version() {
        let a = Specification::new(|s| {
            s.set_name("alpha");
            s.set_version("2.0").unwrap();
        });
        let b = Specification::new(|s| {
            s.set_name("beta");
            s.set_version("1.0").unwrap();
        });
        let a2 = Specification::new(|s| {
            s.set_name("alpha");
            s.set_version("10.0").unwrap();
        });

        assert_eq!(a.order(&b), Ordering::Less);
        assert_eq!(a.order(&a2), Ordering::Less);
        assert_eq!(b.order(&a2), Ordering::Greater);
    }
}
