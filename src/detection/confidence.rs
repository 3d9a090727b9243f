//! Confidence tiers over the 0-100 aggregate score

use serde::{Deserialize, Serialize};
use std::fmt;

pub const HIGH_THRESHOLD: f64 = 80.0;
pub const MEDIUM_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Tier for an aggregate score; the thresholds partition [0, 100] without gaps
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            ConfidenceTier::High
        } else if score >= MEDIUM_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            ConfidenceTier::Low => 0,
            ConfidenceTier::Medium => 1,
            ConfidenceTier::High => 2,
        }
    }

    pub fn is_within_one_of(self, other: ConfidenceTier) -> bool {
        self.rank().abs_diff(other.rank()) <= 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(ConfidenceTier::from_score(100.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(80.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(79.9999), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(50.0), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(49.9999), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(0.0), ConfidenceTier::Low);
    }

    #[test]
    fn test_within_one() {
        assert!(ConfidenceTier::High.is_within_one_of(ConfidenceTier::Medium));
        assert!(ConfidenceTier::Low.is_within_one_of(ConfidenceTier::Medium));
        assert!(!ConfidenceTier::High.is_within_one_of(ConfidenceTier::Low));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ConfidenceTier::Medium).unwrap(), "\"medium\"");
    }
}
