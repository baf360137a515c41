//! Target platform variants.
//!
//! A specification either targets the pure default platform ("ruby") or a
//! named binary platform. The "current" sentinel never survives assignment:
//! `Specification::set_platform` resolves it through [`host`] at that point.

use std::fmt;

/// Sentinel accepted by the platform setter; resolved to the host platform.
pub const CURRENT: &str = "current";

/// Name of the pure default platform.
pub const RUBY: &str = "ruby";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Pure default platform; omitted from full names.
    Ruby,
    /// Binary platform, e.g. "mswin32" or "x86_64-linux".
    Named(String),
}

impl Platform {
    pub fn is_ruby(&self) -> bool {
        matches!(self, Platform::Ruby)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Platform::Ruby => RUBY,
            Platform::Named(name) => name,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Ruby
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Platform {
    fn from(name: &str) -> Self {
        if name.is_empty() || name == RUBY {
            Platform::Ruby
        } else {
            Platform::Named(name.to_string())
        }
    }
}

impl From<String> for Platform {
    fn from(name: String) -> Self {
        Platform::from(name.as_str())
    }
}

/// Host-platform detection, the collaborator behind the "current" sentinel.
pub fn host() -> Platform {
    Platform::Named(format!(
        "{}-{}",
        std::env::consts::ARCH,
        std::env::consts::OS
    ))
}
