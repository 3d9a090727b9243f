//! Recommendation engine
//!
//! Turns the detected platform set, its confidence and an externally supplied
//! maturity estimate into a prioritized list of production-readiness
//! enhancements drawn from a [`RecommendationCatalog`].

pub mod catalog;

pub use catalog::{
    AppliesTo, Effort, RecommendationCatalog, RecommendationCategory, RecommendationTemplate,
    DEFAULT_CATALOG,
};

use crate::detection::scorer::round_score;
use crate::detection::{ConfidenceTier, PlatformScore};
use crate::stack::PlatformId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub category: RecommendationCategory,
    pub priority_score: f64,
    pub estimated_effort: Effort,
    pub rationale: String,
    /// Detected platforms this recommendation was selected for
    pub platforms: Vec<PlatformId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// Detection confidence was Low (or nothing was detected); surface with care
    pub provisional: bool,
    pub maturity_estimate: f64,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationSet {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }
}

/// Priority on a 0-100 scale; every input is expected in [0, 100]
pub fn priority_score(requirement_weight: f64, maturity: f64, complexity: f64, effort: f64) -> f64 {
    let score = 0.40 * requirement_weight
        + 0.30 * (100.0 - maturity)
        + 0.20 * (100.0 - complexity)
        + 0.10 * (100.0 - effort);
    round_score(score).clamp(0.0, 100.0)
}

fn sanitize_maturity(maturity_estimate: f64) -> f64 {
    if !maturity_estimate.is_finite() {
        warn!(maturity_estimate, "Non-finite maturity estimate, using 0");
        return 0.0;
    }
    if !(0.0..=100.0).contains(&maturity_estimate) {
        debug!(maturity_estimate, "Maturity estimate clamped into [0, 100]");
    }
    maturity_estimate.clamp(0.0, 100.0)
}

/// Prioritized recommendations for the detected platform set.
///
/// Only platforms within one confidence tier of the best input score are
/// considered, so passing either `Detection::multi_platform()` or the full
/// ranking yields the same result. Templates that apply to none of them are
/// excluded outright. A Low best tier, or no platforms at all, marks the set
/// provisional; recommendations are still produced.
pub fn recommend(
    scores: &[PlatformScore],
    maturity_estimate: f64,
    catalog: &RecommendationCatalog,
) -> RecommendationSet {
    let maturity = sanitize_maturity(maturity_estimate);

    let Some(best_tier) = scores
        .iter()
        .map(|s| s.confidence_tier)
        .max_by_key(|tier| tier.rank())
    else {
        info!("No platforms detected, no recommendations");
        return RecommendationSet {
            provisional: true,
            maturity_estimate: maturity,
            recommendations: Vec::new(),
        };
    };

    let platforms: Vec<&PlatformId> = scores
        .iter()
        .filter(|s| s.confidence_tier.is_within_one_of(best_tier))
        .map(|s| &s.platform_id)
        .collect();

    let mut recommendations: Vec<Recommendation> = catalog
        .templates()
        .iter()
        .filter_map(|template| {
            let applicable: Vec<(&PlatformId, f64)> = platforms
                .iter()
                .filter_map(|&id| template.requirement_weight_for(id).map(|w| (id, w)))
                .collect();
            let requirement = applicable.iter().map(|(_, w)| *w).reduce(f64::max)?;

            Some(Recommendation {
                id: template.id.clone(),
                title: template.title.clone(),
                category: template.category,
                priority_score: priority_score(
                    requirement,
                    maturity,
                    template.complexity,
                    template.effort.weight(),
                ),
                estimated_effort: template.effort,
                rationale: template.rationale.clone(),
                platforms: applicable.into_iter().map(|(id, _)| id.clone()).collect(),
            })
        })
        .collect();

    recommendations.sort_by(|a, b| {
        b.priority_score
            .total_cmp(&a.priority_score)
            .then_with(|| a.id.cmp(&b.id))
    });

    let provisional = best_tier == ConfidenceTier::Low;
    info!(
        platforms = platforms.len(),
        recommendations = recommendations.len(),
        provisional,
        maturity,
        "Recommendations prioritized"
    );

    RecommendationSet {
        provisional,
        maturity_estimate: maturity,
        recommendations,
    }
}
