use super::platform::*;
use super::SignalCategory;
use crate::error::RegistryError;
use crate::extractors::common::path_matches;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

/// Built-in registry document
pub const DEFAULT_REGISTRY: &str = include_str!("../../data/platforms.toml");

fn default_factor() -> f64 {
    1.0
}

/// Per-category normalizing factor: the summed strength at which a category saturates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Normalization {
    #[serde(default = "default_factor")]
    pub framework_file: f64,
    #[serde(default = "default_factor")]
    pub dependency: f64,
    #[serde(default = "default_factor")]
    pub build_config: f64,
    #[serde(default = "default_factor")]
    pub environment: f64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            framework_file: 1.0,
            dependency: 1.0,
            build_config: 1.0,
            environment: 1.0,
        }
    }
}

impl Normalization {
    pub fn factor(&self, category: SignalCategory) -> f64 {
        match category {
            SignalCategory::FrameworkFile => self.framework_file,
            SignalCategory::Dependency => self.dependency,
            SignalCategory::BuildConfig => self.build_config,
            SignalCategory::Environment => self.environment,
        }
    }
}

/// Borrowed view of one platform's patterns in one category
#[derive(Debug, Clone, Copy)]
pub enum PatternSet<'a> {
    FrameworkFile(&'a [FilePattern]),
    Dependency(&'a [DependencyPattern]),
    BuildConfig(&'a [BuildConfigPattern]),
    Environment(&'a [EnvPattern]),
}

impl PatternSet<'_> {
    pub fn category(&self) -> SignalCategory {
        match self {
            PatternSet::FrameworkFile(_) => SignalCategory::FrameworkFile,
            PatternSet::Dependency(_) => SignalCategory::Dependency,
            PatternSet::BuildConfig(_) => SignalCategory::BuildConfig,
            PatternSet::Environment(_) => SignalCategory::Environment,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PatternSet::FrameworkFile(p) => p.len(),
            PatternSet::Dependency(p) => p.len(),
            PatternSet::BuildConfig(p) => p.len(),
            PatternSet::Environment(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRegistry {
    version: String,
    #[serde(default)]
    normalization: Normalization,
    #[serde(default, rename = "platform")]
    platforms: Vec<RawPlatform>,
}

// Categories are optional here so a missing one can be reported by name
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPlatform {
    id: String,
    name: Option<String>,
    framework_files: Option<Vec<FilePattern>>,
    dependencies: Option<Vec<DependencyPattern>>,
    build_configs: Option<Vec<BuildConfigPattern>>,
    environment: Option<Vec<EnvPattern>>,
}

/// Immutable catalog of platform definitions in fixed load order
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    version: String,
    normalization: Normalization,
    platforms: Vec<PlatformDefinition>,
    index: HashMap<PlatformId, usize>,
}

impl PlatformRegistry {
    /// Registry built from the embedded default document
    pub fn with_defaults() -> Self {
        Self::from_toml_str(DEFAULT_REGISTRY).expect("embedded platform registry is valid")
    }

    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let raw: RawRegistry = toml::from_str(content)?;

        for category in SignalCategory::ALL {
            let factor = raw.normalization.factor(category);
            if !factor.is_finite() || factor <= 0.0 {
                return Err(RegistryError::InvalidNormalization {
                    category,
                    value: factor,
                });
            }
        }

        if raw.platforms.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut platforms = Vec::with_capacity(raw.platforms.len());
        let mut index = HashMap::new();

        for (position, raw_platform) in raw.platforms.into_iter().enumerate() {
            let definition = Self::validate_platform(position, raw_platform)?;
            if index.contains_key(&definition.id) {
                return Err(RegistryError::DuplicatePlatform(definition.id));
            }
            index.insert(definition.id.clone(), platforms.len());
            platforms.push(definition);
        }

        debug!(
            version = %raw.version,
            platforms = platforms.len(),
            "Platform registry loaded"
        );

        Ok(Self {
            version: raw.version,
            normalization: raw.normalization,
            platforms,
            index,
        })
    }

    fn validate_platform(
        position: usize,
        raw: RawPlatform,
    ) -> Result<PlatformDefinition, RegistryError> {
        let id = raw.id.trim().to_string();
        if id.is_empty() {
            return Err(RegistryError::EmptyId { index: position });
        }
        let id = PlatformId::new(id);

        let missing = |category: SignalCategory| RegistryError::MissingCategory {
            platform: id.clone(),
            category,
        };

        let definition = PlatformDefinition {
            name: raw.name.unwrap_or_else(|| id.to_string()),
            framework_files: raw
                .framework_files
                .ok_or_else(|| missing(SignalCategory::FrameworkFile))?,
            dependencies: raw
                .dependencies
                .ok_or_else(|| missing(SignalCategory::Dependency))?,
            build_configs: raw
                .build_configs
                .ok_or_else(|| missing(SignalCategory::BuildConfig))?,
            environment: raw
                .environment
                .ok_or_else(|| missing(SignalCategory::Environment))?,
            id,
        };

        let mut total = 0;
        for category in SignalCategory::ALL {
            total += definition.pattern_count(category);
            for (pattern, strength) in definition.pattern_strengths(category) {
                if pattern.trim().is_empty() {
                    return Err(RegistryError::EmptyPattern {
                        platform: definition.id.clone(),
                        category,
                    });
                }
                if !strength.is_finite() || strength <= 0.0 || strength > 1.0 {
                    return Err(RegistryError::InvalidStrength {
                        platform: definition.id.clone(),
                        category,
                        pattern: pattern.to_string(),
                        strength,
                    });
                }
            }
        }
        if total == 0 {
            return Err(RegistryError::NoPatterns(definition.id));
        }

        for build_config in &definition.build_configs {
            if let Some(marker) = &build_config.marker {
                marker
                    .validate()
                    .map_err(|reason| RegistryError::InvalidMarker {
                        platform: definition.id.clone(),
                        file: build_config.file.clone(),
                        reason,
                    })?;
            }
        }

        Ok(definition)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn normalization(&self) -> &Normalization {
        &self.normalization
    }

    /// Platform ids in load order
    pub fn all_platforms(&self) -> Vec<&PlatformId> {
        self.platforms.iter().map(|p| &p.id).collect()
    }

    /// Definitions in load order
    pub fn definitions(&self) -> &[PlatformDefinition] {
        &self.platforms
    }

    pub fn get(&self, id: &PlatformId) -> Option<&PlatformDefinition> {
        self.index.get(id).map(|&idx| &self.platforms[idx])
    }

    /// Position in load order, the tie-break of last resort when ranking
    pub fn load_order(&self, id: &PlatformId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn patterns_for(&self, id: &PlatformId, category: SignalCategory) -> Option<PatternSet<'_>> {
        let platform = self.get(id)?;
        Some(match category {
            SignalCategory::FrameworkFile => PatternSet::FrameworkFile(&platform.framework_files),
            SignalCategory::Dependency => PatternSet::Dependency(&platform.dependencies),
            SignalCategory::BuildConfig => PatternSet::BuildConfig(&platform.build_configs),
            SignalCategory::Environment => PatternSet::Environment(&platform.environment),
        })
    }

    /// Whether a path matches any platform's build descriptor pattern
    pub fn is_build_descriptor(&self, path: &Path) -> bool {
        self.platforms
            .iter()
            .flat_map(|p| p.build_configs.iter())
            .any(|bc| path_matches(path, &bc.file))
    }

    /// Distinct build descriptor file patterns across all platforms
    pub fn build_descriptor_files(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for build_config in self.platforms.iter().flat_map(|p| p.build_configs.iter()) {
            if seen.insert(build_config.file.as_str()) {
                result.push(build_config.file.as_str());
            }
        }
        result
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
