//! gemspec CLI - thin JSON bridge over the specification model.
//!
//! Commands: validate, render, parse, dependents
//! Outputs JSON (or canonical text for `render`) to stdout
//! Returns exit code 2 on validation failure

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use gemspec_core::{parse_ruby, to_json, Registry, Specification, SpecificationError};

#[derive(Parser)]
#[command(name = "gemspec-cli")]
#[command(about = "Package specification model - validate, render, query")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a specification
    Validate {
        /// JSON payload (SpecPayload)
        #[arg(short, long)]
        payload: String,
    },

    /// Render a specification in canonical text form
    Render {
        /// JSON payload (SpecPayload)
        #[arg(short, long)]
        payload: String,
    },

    /// Parse a canonical-form file and print the JSON field map
    Parse {
        /// Path to a .gemspec file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Reverse-dependency query over a directory of .gemspec files
    Dependents {
        /// Directory containing .gemspec files
        #[arg(short, long)]
        dir: PathBuf,

        /// Package name to query
        #[arg(short, long)]
        name: String,

        /// Exact package version to query
        #[arg(short, long)]
        version: String,
    },
}

/// Field-by-field payload; every field is optional and applied through the
/// coercing setters.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SpecPayload {
    name: Option<String>,
    version: Option<String>,
    platform: Option<String>,
    date: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    author: Option<String>,
    email: Option<String>,
    homepage: Option<String>,
    rubyforge_project: Option<String>,
    autorequire: Option<String>,
    default_executable: Option<String>,
    bindir: Option<String>,
    has_rdoc: Option<bool>,
    required_ruby_version: Option<String>,
    require_paths: Option<Vec<String>>,
    files: Option<Vec<String>>,
    test_files: Option<Vec<String>>,
    library_stubs: Option<Vec<String>>,
    rdoc_options: Option<Vec<String>>,
    extra_rdoc_files: Option<Vec<String>>,
    executables: Option<Vec<String>>,
    extensions: Option<Vec<String>>,
    requirements: Option<Vec<String>>,
    dependencies: Vec<DependencyPayload>,
}

#[derive(Debug, Deserialize)]
struct DependencyPayload {
    name: String,
    #[serde(default)]
    requirements: Vec<String>,
}

fn build_spec(payload: SpecPayload) -> Result<Specification, SpecificationError> {
    let mut spec = Specification::default();
    if let Some(v) = payload.name {
        spec.set_name(v);
    }
    if let Some(v) = payload.version {
        spec.set_version(v)?;
    }
    if let Some(v) = payload.platform {
        spec.set_platform(v);
    }
    if let Some(v) = payload.date {
        spec.set_date(v);
    }
    if let Some(v) = payload.summary {
        spec.set_summary(v);
    }
    if let Some(v) = payload.description {
        spec.set_description(v);
    }
    if let Some(v) = payload.author {
        spec.set_author(v);
    }
    if let Some(v) = payload.email {
        spec.set_email(v);
    }
    if let Some(v) = payload.homepage {
        spec.set_homepage(v);
    }
    if let Some(v) = payload.rubyforge_project {
        spec.set_rubyforge_project(v);
    }
    if let Some(v) = payload.autorequire {
        spec.set_autorequire(v);
    }
    if let Some(v) = payload.default_executable {
        spec.set_default_executable(v);
    }
    if let Some(v) = payload.bindir {
        spec.set_bindir(v);
    }
    if let Some(v) = payload.has_rdoc {
        spec.set_has_rdoc(v);
    }
    if let Some(v) = payload.required_ruby_version {
        spec.set_required_ruby_version(v)?;
    }
    if let Some(v) = payload.require_paths {
        spec.set_require_paths(v);
    }
    if let Some(v) = payload.files {
        spec.set_files(v);
    }
    if let Some(v) = payload.test_files {
        spec.set_test_files(v);
    }
    if let Some(v) = payload.library_stubs {
        spec.set_library_stubs(v);
    }
    if let Some(v) = payload.rdoc_options {
        spec.set_rdoc_options(v);
    }
    if let Some(v) = payload.extra_rdoc_files {
        spec.set_extra_rdoc_files(v);
    }
    if let Some(v) = payload.executables {
        spec.set_executables(v);
    }
    if let Some(v) = payload.extensions {
        spec.set_extensions(v);
    }
    if let Some(v) = payload.requirements {
        spec.set_requirements(v);
    }
    for dep in payload.dependencies {
        let refs: Vec<&str> = dep.requirements.iter().map(String::as_str).collect();
        spec.add_dependency_on(dep.name, &refs)?;
    }
    Ok(spec)
}

fn spec_from_payload(payload: &str) -> Result<Specification, String> {
    let payload: SpecPayload =
        serde_json::from_str(payload).map_err(|e| format!("Invalid payload: {e}"))?;
    build_spec(payload).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { payload } => {
            let mut spec = match spec_from_payload(&payload) {
                Ok(s) => s,
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "{e}"}}"#);
                    return ExitCode::FAILURE;
                }
            };
            match spec.validate() {
                Ok(()) => {
                    let output = serde_json::json!({
                        "valid": true,
                        "full_name": spec.full_name(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    let output = serde_json::json!({
                        "valid": false,
                        "error": e.to_string(),
                    });
                    println!("{}", serde_json::to_string(&output).unwrap());
                    ExitCode::from(2) // Validation failure
                }
            }
        }

        Commands::Render { payload } => {
            let mut spec = match spec_from_payload(&payload) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!(r#"{{"error": "{e}"}}"#);
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = spec.validate() {
                eprintln!(r#"{{"error": "{e}"}}"#);
                return ExitCode::from(2);
            }
            print!("{}", spec.to_ruby());
            ExitCode::SUCCESS
        }

        Commands::Parse { file } => {
            let content = match fs::read_to_string(&file) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!(r#"{{"error": "Failed to read {}: {e}"}}"#, file.display());
                    return ExitCode::FAILURE;
                }
            };
            match parse_ruby(&content) {
                Ok(mut spec) => {
                    println!("{}", serde_json::to_string_pretty(&to_json(&mut spec)).unwrap());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!(r#"{{"error": "{e}"}}"#);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Dependents { dir, name, version } => {
            let registry = match Registry::load_from_dir(&dir) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!(r#"{{"error": "Failed to load specifications: {e}"}}"#);
                    return ExitCode::FAILURE;
                }
            };
            let spec = match registry.find(&name, &version) {
                Some(s) => s.clone(),
                None => {
                    eprintln!(r#"{{"error": "No specification for {name}-{version}"}}"#);
                    return ExitCode::FAILURE;
                }
            };

            let hits: Vec<_> = registry
                .dependent_records(&spec)
                .iter()
                .map(|hit| {
                    serde_json::json!({
                        "dependent": hit.dependent.full_name(),
                        "dependency": {
                            "name": hit.dependency.name(),
                            "requirements": hit.dependency.requirements_list(),
                        },
                        "satisfiers": hit
                            .satisfiers
                            .iter()
                            .map(|s| s.full_name())
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&hits).unwrap());
            ExitCode::SUCCESS
        }
    }
}
