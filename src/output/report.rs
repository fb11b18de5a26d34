//! Report structure for one screening run

use crate::config::ScoringConfig;
use crate::processing::document::{CandidateFailure, MatchRecord, ScreeningBatch};
use crate::processing::scoring::Decision;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a formatter needs to render one screening run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Where the job description came from (a path or "sample")
    pub job_source: String,

    /// Competencies extracted from the job description
    pub required_competencies: Vec<String>,

    /// Ranked records, highest score first
    pub records: Vec<MatchRecord>,

    /// Candidates that could not be read or scored
    pub failures: Vec<CandidateFailure>,

    /// Weights and thresholds the scores were computed with
    pub weights: ScoringConfig,
}

impl ScreeningReport {
    pub fn new(
        job_source: impl Into<String>,
        required_competencies: Vec<String>,
        batch: ScreeningBatch,
        weights: ScoringConfig,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            job_source: job_source.into(),
            required_competencies,
            records: batch.records,
            failures: batch.failures,
            weights,
        }
    }

    pub fn count_by_decision(&self, decision: Decision) -> usize {
        self.records.iter().filter(|r| r.decision == decision).count()
    }
}
