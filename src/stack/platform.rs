//! Platform definitions and the detection patterns they declare

use super::version::Version;
use super::SignalCategory;
use crate::extractors::parsers::manifest::DeclaredDependency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry-assigned platform identifier (e.g. `nextjs`, `spring-boot`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlatformId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Package ecosystem a dependency pattern applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    Cargo,
    Pypi,
    Maven,
    Gomod,
    Rubygems,
    Composer,
    Hex,
    Nuget,
}

impl Ecosystem {
    /// Canonical form of a package name for equality checks within this ecosystem
    pub fn normalize(self, name: &str) -> String {
        match self {
            // PEP 503: case-insensitive, runs of `-`, `_`, `.` are equivalent
            Ecosystem::Pypi => {
                let mut out = String::with_capacity(name.len());
                let mut last_was_separator = false;
                for c in name.trim().chars() {
                    if matches!(c, '-' | '_' | '.') {
                        if !last_was_separator {
                            out.push('-');
                        }
                        last_was_separator = true;
                    } else {
                        out.push(c.to_ascii_lowercase());
                        last_was_separator = false;
                    }
                }
                out
            }
            Ecosystem::Composer | Ecosystem::Nuget => name.trim().to_lowercase(),
            _ => name.trim().to_string(),
        }
    }
}

fn default_strength() -> f64 {
    1.0
}

/// Framework file pattern: a path segment sequence, or `*suffix` for file-name suffixes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilePattern {
    pub pattern: String,
    #[serde(default = "default_strength")]
    pub strength: f64,
}

/// Dependency pattern: exact package name within an ecosystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyPattern {
    pub ecosystem: Ecosystem,
    pub name: String,
    #[serde(default = "default_strength")]
    pub strength: f64,
    /// Minimum compatible version; older declared versions do not count as evidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<Version>,
}

impl DependencyPattern {
    /// Check if a declared dependency satisfies this pattern
    pub fn matches(&self, ecosystem: Ecosystem, dep: &DeclaredDependency) -> bool {
        if ecosystem != self.ecosystem {
            return false;
        }
        if self.ecosystem.normalize(&dep.name) != self.ecosystem.normalize(&self.name) {
            return false;
        }
        self.is_version_compatible(dep.version.as_deref())
    }

    fn is_version_compatible(&self, declared: Option<&str>) -> bool {
        let Some(min) = self.min_version else {
            return true;
        };
        match declared.and_then(Version::from_requirement) {
            Some(version) => version >= min,
            None => true,
        }
    }
}

/// Marker that must be present inside a build descriptor for it to count.
///
/// Exactly one of `key` (dotted lookup into structured content, optionally compared
/// with `equals`) or `contains` (raw text search) is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
}

impl MarkerRule {
    pub fn validate(&self) -> Result<(), String> {
        match (&self.key, &self.contains) {
            (Some(_), Some(_)) => Err("marker sets both 'key' and 'contains'".to_string()),
            (None, None) => Err("marker needs 'key' or 'contains'".to_string()),
            (None, Some(_)) if self.equals.is_some() => {
                Err("'equals' is only valid together with 'key'".to_string())
            }
            (Some(key), None) if key.trim().is_empty() => Err("marker key is empty".to_string()),
            (None, Some(text)) if text.is_empty() => {
                Err("marker 'contains' text is empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Build descriptor pattern: a file, optionally with a marker inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfigPattern {
    pub file: String,
    #[serde(default = "default_strength")]
    pub strength: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerRule>,
}

/// Environment variable pattern; a trailing `*` turns it into a prefix match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvPattern {
    pub name: String,
    #[serde(default = "default_strength")]
    pub strength: f64,
}

impl EnvPattern {
    pub fn matches(&self, variable: &str) -> bool {
        match self.name.strip_suffix('*') {
            Some(prefix) => variable.starts_with(prefix),
            None => variable == self.name,
        }
    }
}

/// A registered platform and its evidence patterns per signal category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformDefinition {
    pub id: PlatformId,
    pub name: String,
    pub framework_files: Vec<FilePattern>,
    pub dependencies: Vec<DependencyPattern>,
    pub build_configs: Vec<BuildConfigPattern>,
    pub environment: Vec<EnvPattern>,
}

impl PlatformDefinition {
    pub fn pattern_count(&self, category: SignalCategory) -> usize {
        match category {
            SignalCategory::FrameworkFile => self.framework_files.len(),
            SignalCategory::Dependency => self.dependencies.len(),
            SignalCategory::BuildConfig => self.build_configs.len(),
            SignalCategory::Environment => self.environment.len(),
        }
    }

    /// `(description, strength)` of every pattern in a category, used for validation
    pub(crate) fn pattern_strengths(&self, category: SignalCategory) -> Vec<(&str, f64)> {
        match category {
            SignalCategory::FrameworkFile => self
                .framework_files
                .iter()
                .map(|p| (p.pattern.as_str(), p.strength))
                .collect(),
            SignalCategory::Dependency => self
                .dependencies
                .iter()
                .map(|p| (p.name.as_str(), p.strength))
                .collect(),
            SignalCategory::BuildConfig => self
                .build_configs
                .iter()
                .map(|p| (p.file.as_str(), p.strength))
                .collect(),
            SignalCategory::Environment => self
                .environment
                .iter()
                .map(|p| (p.name.as_str(), p.strength))
                .collect(),
        }
    }
}
