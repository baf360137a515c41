//! Contract Invariant Tests
//!
//! These tests verify the specification model's observable guarantees:
//! round-tripping, fail-fast validation, and the documented field rules.

use gemspec_core::{parse_ruby, Dependency, Registry, Specification, PRODUCER_VERSION};

fn complete_spec() -> Specification {
    Specification::new(|s| {
        s.set_name("rfoo");
        s.set_version("1.0").unwrap();
        s.set_summary("Example package specification");
        s.set_date("2004-03-29");
        s.set_author("A. Maintainer");
        s.set_files(["lib/rfoo.rb", "README", "bin/rfoo"]);
        s.set_extra_rdoc_files(["README"]);
        s.set_executables(["rfoo"]);
        s.set_rdoc_options(["--main", "README"]);
        s.add_dependency_on("rbar", &["> 0.4.0"]).unwrap();
        s.add_dependency_on("rbaz", &[]).unwrap();
    })
}

#[test]
fn invariant_round_trip_reconstructs_equal_record() {
    let mut spec = complete_spec();
    spec.validate().expect("complete spec must validate");

    let text = spec.to_ruby();
    let reparsed = parse_ruby(&text).expect("canonical form must parse");

    assert_eq!(reparsed, spec);
    assert_eq!(reparsed.dependencies(), spec.dependencies());

    // Re-rendering the reparsed record reproduces the text.
    let mut reparsed = reparsed;
    assert_eq!(reparsed.to_ruby(), text);
}

#[test]
fn invariant_round_trip_with_platform_and_requirement() {
    let mut spec = complete_spec();
    spec.set_platform("mswin32");
    spec.set_required_ruby_version(">= 1.8").unwrap();
    spec.validate().unwrap();

    let reparsed = parse_ruby(&spec.to_ruby()).unwrap();
    assert_eq!(reparsed, spec);
    assert_eq!(reparsed.full_name(), "rfoo-1.0-mswin32");
}

#[test]
fn invariant_default_executable_rule() {
    let mut spec = Specification::default();
    assert_eq!(spec.default_executable(), None);

    spec.set_executables(["rfoo"]);
    assert_eq!(spec.default_executable(), Some("rfoo"));

    spec.set_executables(["rfoo", "rbar"]);
    assert_eq!(spec.default_executable(), None);

    spec.set_default_executable("rbar");
    assert_eq!(spec.default_executable(), Some("rbar"));
}

#[test]
fn invariant_full_name_omits_pure_platform() {
    let mut spec = Specification::new(|s| {
        s.set_name("foo");
        s.set_version("1.0").unwrap();
    });
    assert_eq!(spec.full_name(), "foo-1.0");

    spec.set_platform("mswin32");
    assert_eq!(spec.full_name(), "foo-1.0-mswin32");
}

#[test]
fn invariant_normalize_is_idempotent() {
    let mut spec = Specification::new(|s| {
        s.set_files(["lib/a.rb", "lib/a.rb", "README"]);
        s.set_extra_rdoc_files(["README", "HISTORY", "README"]);
    });

    spec.normalize();
    let files = spec.files().to_vec();
    let extra = spec.extra_rdoc_files().to_vec();

    spec.normalize();
    assert_eq!(spec.files(), files);
    assert_eq!(spec.extra_rdoc_files(), extra);

    // extra_rdoc_files is a subset of files after normalization.
    for file in spec.extra_rdoc_files() {
        assert!(spec.files().contains(file));
    }
}

#[test]
fn invariant_validation_fails_fast_naming_the_field() {
    // name is the first required field without a default.
    let mut spec = Specification::new(|s| {
        s.set_summary("has a summary but no name or version");
    });

    let err = spec.validate().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("invalid specification"));
    assert!(message.contains("missing value for attribute name"));
    assert!(!message.contains("version"));
}

#[test]
fn invariant_producer_version_is_pinned() {
    let mut spec = complete_spec();
    spec.set_rubygems_version("0.0.1-other");
    let err = spec.validate().unwrap_err();
    assert!(err.to_string().contains("expected producer version"));

    spec.set_rubygems_version(PRODUCER_VERSION);
    assert!(spec.validate().is_ok());
}

#[test]
fn invariant_dependency_satisfaction() {
    let spec = Specification::new(|s| {
        s.set_name("foo");
        s.set_version("1.2.0").unwrap();
    });

    let dep = Dependency::parse("foo", &["> 1.0", "< 2.0"]).unwrap();
    assert!(spec.satisfies_requirement(&dep));

    let renamed = Dependency::parse("bar", &["> 1.0", "< 2.0"]).unwrap();
    assert!(!spec.satisfies_requirement(&renamed));

    let out_of_range = Dependency::parse("foo", &["> 2.0"]).unwrap();
    assert!(!spec.satisfies_requirement(&out_of_range));
}

#[test]
fn invariant_singular_alias_overwrites() {
    let mut spec = Specification::new(|s| {
        s.set_require_paths(["lib", "ext"]);
    });
    spec.set_require_path("lib");
    assert_eq!(spec.require_paths(), ["lib"]);
}

#[test]
fn invariant_registries_are_isolated() {
    let mut a = Registry::new();
    let mut b = Registry::new();

    a.create(|s| {
        s.set_name("only-in-a");
        s.set_version("1.0").unwrap();
    });

    assert_eq!(a.len(), 1);
    assert!(b.is_empty());

    b.create(|s| {
        s.set_name("only-in-b");
        s.set_version("1.0").unwrap();
    });
    assert!(a.find("only-in-b", "1.0").is_none());
    assert!(b.find("only-in-a", "1.0").is_none());
}

#[test]
fn invariant_reverse_query_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();

    let mut lib = Specification::new(|s| {
        s.set_name("rbar");
        s.set_version("0.5.0").unwrap();
        s.set_summary("library");
    });
    let mut app = Specification::new(|s| {
        s.set_name("rfoo");
        s.set_version("1.0").unwrap();
        s.set_summary("application");
        s.add_dependency_on("rbar", &["> 0.4.0"]).unwrap();
    });

    std::fs::write(dir.path().join("rbar-0.5.0.gemspec"), lib.to_ruby()).unwrap();
    std::fs::write(dir.path().join("rfoo-1.0.gemspec"), app.to_ruby()).unwrap();

    let registry = Registry::load_from_dir(dir.path()).unwrap();
    assert_eq!(registry.len(), 2);

    let lib_loaded = registry.find("rbar", "0.5.0").unwrap();
    let hits = registry.dependent_records(lib_loaded);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].dependent.name(), Some("rfoo"));
    assert_eq!(hits[0].satisfiers.len(), 1);
}
