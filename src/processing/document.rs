//! Document structures for a screening session

use crate::processing::scoring::{Decision, MetricScores};
use serde::{Deserialize, Serialize};

/// The job description a matcher is bound to; immutable after fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDocument {
    pub raw_text: String,
    pub normalized_text: String,
    pub competencies: Vec<String>,
    pub vector: Vec<f64>,
}

/// A candidate submitted for scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInput {
    pub identifier: String,
    pub text: String,
}

impl CandidateInput {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDocument {
    pub identifier: String,
    pub raw_text: String,
    pub normalized_text: String,
    pub competencies: Vec<String>,
}

/// Outcome of scoring one candidate against the reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub candidate_id: String,
    pub score: f64,
    pub metrics: MetricScores,
    pub competencies: Vec<String>,
    pub missing_competencies: Vec<String>,
    pub decision: Decision,
}

impl MatchRecord {
    pub fn competencies_joined(&self) -> String {
        self.competencies.join(", ")
    }

    pub fn missing_joined(&self) -> String {
        self.missing_competencies.join(", ")
    }

    /// Percentage with two decimals, for display only
    pub fn score_percentage(&self) -> String {
        format!("{:.2}%", self.score * 100.0)
    }
}

/// A candidate that could not be scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFailure {
    pub identifier: String,
    pub reason: String,
}

/// Ranked records plus the candidates that failed on their own
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningBatch {
    pub records: Vec<MatchRecord>,
    pub failures: Vec<CandidateFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_formatting() {
        let record = MatchRecord {
            candidate_id: "alex".to_string(),
            score: 0.512345,
            metrics: MetricScores { cosine: 0.6, euclidean: 0.55, lexical: 0.2 },
            competencies: vec!["python".to_string(), "sql".to_string()],
            missing_competencies: vec!["aws".to_string()],
            decision: Decision::Fit,
        };
        assert_eq!(record.score_percentage(), "51.23%");
        assert_eq!(record.competencies_joined(), "python, sql");
        assert_eq!(record.missing_joined(), "aws");
    }

    #[test]
    fn test_json_keeps_full_precision() {
        let record = MatchRecord {
            candidate_id: "c1".to_string(),
            score: 0.123456789,
            metrics: MetricScores { cosine: 0.1, euclidean: 0.5, lexical: 0.0 },
            competencies: Vec::new(),
            missing_competencies: Vec::new(),
            decision: Decision::NotFit,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("0.123456789"));
        assert!(json.contains("\"Not Fit\""));
    }
}
