use serde::{Deserialize, Serialize};
use std::fmt;

/// The four kinds of evidence a platform can be detected from.
///
/// Declaration order is the canonical order used for maps and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    FrameworkFile,
    Dependency,
    BuildConfig,
    Environment,
}

impl SignalCategory {
    pub const ALL: [SignalCategory; 4] = [
        SignalCategory::FrameworkFile,
        SignalCategory::Dependency,
        SignalCategory::BuildConfig,
        SignalCategory::Environment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SignalCategory::FrameworkFile => "framework_file",
            SignalCategory::Dependency => "dependency",
            SignalCategory::BuildConfig => "build_config",
            SignalCategory::Environment => "environment",
        }
    }

    /// Key under which a platform lists this category's patterns in the registry document
    pub fn registry_key(self) -> &'static str {
        match self {
            SignalCategory::FrameworkFile => "framework_files",
            SignalCategory::Dependency => "dependencies",
            SignalCategory::BuildConfig => "build_configs",
            SignalCategory::Environment => "environment",
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
