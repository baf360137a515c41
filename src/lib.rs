//! Package specification data model.
//!
//! A `Specification` is a versioned, self-describing metadata record for an
//! installable package. The crate provides:
//!
//! - a static attribute schema governing which fields exist, their defaults,
//!   and which are required or read-only;
//! - coercing setters for versions, platforms, dates and wrapped text;
//! - fail-fast validation and idempotent normalization;
//! - an explicit registry with a reverse-dependency query;
//! - a canonical, re-derivable text serialization with a matching reader.

pub mod dependency;
pub mod platform;
pub mod registry;
pub mod schema;
pub mod serialize;
pub mod specification;
pub mod validation;
pub mod version;

pub use dependency::Dependency;
pub use platform::Platform;
pub use registry::{DependentRecord, Registry};
pub use serialize::{parse_ruby, to_json};
pub use specification::Specification;
pub use validation::SpecificationError;
pub use version::{VersionRequirement, VersionValue};

/// Version stamp of this producer; validated specifications must carry it.
pub const PRODUCER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema-format version applied to new specifications. Bumped whenever the
/// field protocol changes.
pub const CURRENT_SPECIFICATION_VERSION: i64 = 1;

/// Marker for specifications predating versioned schemas.
pub const NONEXISTENT_SPECIFICATION_VERSION: i64 = -1;
