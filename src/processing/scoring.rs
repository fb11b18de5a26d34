//! Composite scoring and the three-tier decision

use crate::config::ScoringConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "Fit")]
    Fit,
    #[serde(rename = "Potential Fit")]
    PotentialFit,
    #[serde(rename = "Not Fit")]
    NotFit,
}

impl Decision {
    /// Decision under the default thresholds. Both bounds are strict.
    pub fn from_score(score: f64) -> Self {
        MatchScorer::default().decide(score)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Fit => "Fit",
            Decision::PotentialFit => "Potential Fit",
            Decision::NotFit => "Not Fit",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-metric similarity of one candidate to the reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricScores {
    pub cosine: f64,
    pub euclidean: f64,
    pub lexical: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer {
    config: ScoringConfig,
}

impl MatchScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Weighted blend of the three metrics, clamped to [0, 1]
    pub fn composite(&self, metrics: &MetricScores) -> f64 {
        let score = self.config.cosine_weight * metrics.cosine
            + self.config.euclidean_weight * metrics.euclidean
            + self.config.lexical_weight * metrics.lexical;

        if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        }
    }

    pub fn decide(&self, score: f64) -> Decision {
        if score > self.config.fit_threshold {
            Decision::Fit
        } else if score > self.config.potential_fit_threshold {
            Decision::PotentialFit
        } else {
            Decision::NotFit
        }
    }
}
