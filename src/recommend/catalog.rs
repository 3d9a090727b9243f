//! Recommendation catalog: enhancement templates loaded from a versioned TOML document

use crate::error::CatalogError;
use crate::stack::{PlatformId, PlatformRegistry};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Built-in catalog document
pub const DEFAULT_CATALOG: &str = include_str!("../../data/recommendations.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Security,
    Observability,
    Testing,
    Deployment,
    Performance,
    Reliability,
    Documentation,
    Ci,
}

impl RecommendationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationCategory::Security => "security",
            RecommendationCategory::Observability => "observability",
            RecommendationCategory::Testing => "testing",
            RecommendationCategory::Deployment => "deployment",
            RecommendationCategory::Performance => "performance",
            RecommendationCategory::Reliability => "reliability",
            RecommendationCategory::Documentation => "documentation",
            RecommendationCategory::Ci => "ci",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Trivial,
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl Effort {
    /// Effort on the 0-100 scale used by priority scoring
    pub fn weight(self) -> f64 {
        match self {
            Effort::Trivial => 10.0,
            Effort::Small => 25.0,
            Effort::Medium => 50.0,
            Effort::Large => 75.0,
            Effort::ExtraLarge => 90.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Effort::Trivial => "trivial",
            Effort::Small => "small",
            Effort::Medium => "medium",
            Effort::Large => "large",
            Effort::ExtraLarge => "extra_large",
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platforms a template applies to: `"*"` or a list of platform ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppliesTo {
    Any(String),
    Platforms(Vec<PlatformId>),
}

impl AppliesTo {
    pub fn is_any(&self) -> bool {
        matches!(self, AppliesTo::Any(s) if s == "*")
    }

    pub fn applies(&self, platform: &PlatformId) -> bool {
        match self {
            AppliesTo::Any(_) => self.is_any(),
            AppliesTo::Platforms(ids) => ids.contains(platform),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationTemplate {
    pub id: String,
    pub title: String,
    pub category: RecommendationCategory,
    pub applies_to: AppliesTo,
    /// How strongly the platform calls for this enhancement, 0-100
    pub requirement_weight: f64,
    #[serde(default)]
    pub platform_weights: BTreeMap<PlatformId, f64>,
    pub complexity: f64,
    pub effort: Effort,
    pub rationale: String,
}

impl RecommendationTemplate {
    /// Requirement weight for `platform`, or `None` when the template does not apply to it
    pub fn requirement_weight_for(&self, platform: &PlatformId) -> Option<f64> {
        if !self.applies_to.applies(platform) {
            return None;
        }
        Some(
            self.platform_weights
                .get(platform)
                .copied()
                .unwrap_or(self.requirement_weight),
        )
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let in_range = |field: &str, value: f64| {
            if value.is_finite() && (0.0..=100.0).contains(&value) {
                Ok(())
            } else {
                Err(CatalogError::WeightOutOfRange {
                    id: self.id.clone(),
                    field: field.to_string(),
                    value,
                })
            }
        };

        in_range("requirement_weight", self.requirement_weight)?;
        in_range("complexity", self.complexity)?;

        match &self.applies_to {
            AppliesTo::Any(_) if !self.applies_to.is_any() => {
                return Err(CatalogError::NoApplicablePlatforms(self.id.clone()));
            }
            AppliesTo::Platforms(ids) if ids.is_empty() => {
                return Err(CatalogError::NoApplicablePlatforms(self.id.clone()));
            }
            _ => {}
        }

        for (platform, weight) in &self.platform_weights {
            if !self.applies_to.applies(platform) {
                return Err(CatalogError::UnknownPlatformWeight {
                    id: self.id.clone(),
                    platform: platform.clone(),
                });
            }
            in_range(&format!("platform_weights.{}", platform), *weight)?;
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    version: String,
    #[serde(default, rename = "recommendation")]
    recommendations: Vec<RecommendationTemplate>,
}

/// Immutable, validated set of recommendation templates in document order
#[derive(Debug, Clone)]
pub struct RecommendationCatalog {
    version: String,
    templates: Vec<RecommendationTemplate>,
}

impl RecommendationCatalog {
    pub fn with_defaults() -> Self {
        Self::from_toml_str(DEFAULT_CATALOG).expect("embedded recommendation catalog is valid")
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = toml::from_str(content)?;
        let mut seen = HashSet::new();

        for (index, template) in raw.recommendations.iter().enumerate() {
            if template.id.trim().is_empty() {
                return Err(CatalogError::EmptyId { index });
            }
            if !seen.insert(template.id.as_str()) {
                return Err(CatalogError::DuplicateRecommendation(template.id.clone()));
            }
            template.validate()?;
        }

        debug!(
            version = %raw.version,
            recommendations = raw.recommendations.len(),
            "Recommendation catalog loaded"
        );

        Ok(Self {
            version: raw.version,
            templates: raw.recommendations,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn templates(&self) -> &[RecommendationTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Platform ids referenced by the catalog that the registry does not define
    pub fn unknown_platforms<'a>(&'a self, registry: &PlatformRegistry) -> Vec<&'a PlatformId> {
        let mut unknown: Vec<&PlatformId> = self
            .templates
            .iter()
            .filter_map(|t| match &t.applies_to {
                AppliesTo::Platforms(ids) => Some(ids.iter()),
                AppliesTo::Any(_) => None,
            })
            .flatten()
            .filter(|id| registry.get(id).is_none())
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }
}

impl Default for RecommendationCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
