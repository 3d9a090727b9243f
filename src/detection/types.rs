use super::confidence::ConfidenceTier;
use crate::extractors::SignalObservation;
use crate::stack::{PlatformId, SignalCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fused score for one platform that received at least one observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformScore {
    pub platform_id: PlatformId,
    pub name: String,
    /// Every category is present, unobserved ones at 0
    pub category_scores: BTreeMap<SignalCategory, f64>,
    pub aggregate_score: f64,
    pub confidence_tier: ConfidenceTier,
    /// Observations behind this score, in canonical order
    pub evidence: Vec<SignalObservation>,
}

impl PlatformScore {
    pub fn category_score(&self, category: SignalCategory) -> f64 {
        self.category_scores.get(&category).copied().unwrap_or(0.0)
    }
}

/// Result of one detection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub registry_version: String,
    /// SHA-256 of the evidence snapshot, for caching results by input
    pub evidence_fingerprint: String,
    /// All observed platforms, best first
    pub ranked: Vec<PlatformScore>,
    /// Length of the leading run of `ranked` within one tier of the top platform
    pub multi_platform_count: usize,
}

impl Detection {
    /// Platforms concurrently valid alongside the top-ranked one, top included
    pub fn multi_platform(&self) -> &[PlatformScore] {
        &self.ranked[..self.multi_platform_count.min(self.ranked.len())]
    }

    pub fn top(&self) -> Option<&PlatformScore> {
        self.ranked.first()
    }

    /// No platform received any observation
    pub fn is_undetermined(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.multi_platform().len() > 1
    }
}
