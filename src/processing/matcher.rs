//! Reference-bound matching: fit once on a job description, score many resumes

use crate::config::Config;
use crate::error::Result;
use crate::processing::document::{
    CandidateDocument, CandidateFailure, CandidateInput, MatchRecord, ReferenceDocument,
    ScreeningBatch,
};
use crate::processing::lexical::LexicalSimilarity;
use crate::processing::scoring::{MatchScorer, MetricScores};
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::text_processor::TextNormalizer;
use crate::processing::vector_space::VectorSpaceModel;
use crate::processing::vocabulary::Vocabulary;
use log::{debug, info, warn};

/// Unfitted matcher. The only thing it can do is bind a reference document.
pub struct Matcher {
    normalizer: TextNormalizer,
    vector_space: VectorSpaceModel,
    lexical: LexicalSimilarity,
    skills: SkillExtractor,
    scorer: MatchScorer,
}

/// Matcher bound to one reference document
pub struct FittedMatcher {
    reference: ReferenceDocument,
    normalizer: TextNormalizer,
    vector_space: VectorSpaceModel,
    lexical: LexicalSimilarity,
    skills: SkillExtractor,
    scorer: MatchScorer,
}

impl Matcher {
    pub fn new(config: &Config, vocabulary: Vocabulary) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            normalizer: TextNormalizer::new(),
            vector_space: VectorSpaceModel::new(config.vector_space),
            lexical: LexicalSimilarity::new(&config.lexical),
            skills: SkillExtractor::new(vocabulary)?,
            scorer: MatchScorer::new(config.scoring),
        })
    }

    /// Build with the vocabulary named in the config, or the built-in one
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config, Vocabulary::from_config(&config.vocabulary)?)
    }

    pub fn fit(mut self, reference_text: &str) -> Result<FittedMatcher> {
        let normalized_text = self.normalizer.normalize(reference_text);
        self.vector_space.fit(&normalized_text)?;
        let vector = self.vector_space.transform(&normalized_text)?;
        let competencies = self.skills.extract(reference_text);

        info!(
            "Fitted reference: {} vocabulary terms, {} competencies",
            self.vector_space.dimensions(),
            competencies.len()
        );

        Ok(FittedMatcher {
            reference: ReferenceDocument {
                raw_text: reference_text.to_string(),
                normalized_text,
                competencies,
                vector,
            },
            normalizer: self.normalizer,
            vector_space: self.vector_space,
            lexical: self.lexical,
            skills: self.skills,
            scorer: self.scorer,
        })
    }
}

impl FittedMatcher {
    pub fn reference(&self) -> &ReferenceDocument {
        &self.reference
    }

    pub fn skill_extractor(&self) -> &SkillExtractor {
        &self.skills
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }

    pub fn analyze_candidate(&self, identifier: &str, text: &str) -> CandidateDocument {
        CandidateDocument {
            identifier: identifier.to_string(),
            raw_text: text.to_string(),
            normalized_text: self.normalizer.normalize(text),
            competencies: self.skills.extract(text),
        }
    }

    pub fn match_one(&self, identifier: &str, text: &str) -> Result<MatchRecord> {
        let candidate = self.analyze_candidate(identifier, text);
        self.score_candidate(candidate)
    }

    pub fn score_candidate(&self, candidate: CandidateDocument) -> Result<MatchRecord> {
        let vector = self.vector_space.transform(&candidate.normalized_text)?;

        let metrics = MetricScores {
            cosine: self.vector_space.cosine(&self.reference.vector, &vector)?,
            euclidean: self
                .vector_space
                .euclidean_similarity(&self.reference.vector, &vector)?,
            lexical: self.lexical.similarity(&self.reference.raw_text, &candidate.raw_text),
        };

        let score = self.scorer.composite(&metrics);
        let decision = self.scorer.decide(score);
        let missing_competencies = self.missing_competencies(&candidate.competencies);

        debug!(
            "{}: score {:.4} (cosine {:.4}, euclidean {:.4}, lexical {:.4})",
            candidate.identifier, score, metrics.cosine, metrics.euclidean, metrics.lexical
        );

        Ok(MatchRecord {
            candidate_id: candidate.identifier,
            score,
            metrics,
            competencies: candidate.competencies,
            missing_competencies,
            decision,
        })
    }

    /// Reference competencies the candidate lacks, in reference order
    pub fn missing_competencies(&self, candidate_competencies: &[String]) -> Vec<String> {
        self.reference
            .competencies
            .iter()
            .filter(|c| !candidate_competencies.contains(c))
            .cloned()
            .collect()
    }

    /// Score every candidate and rank by score, ties in submission order
    pub fn match_many(&self, candidates: &[CandidateInput]) -> Result<Vec<MatchRecord>> {
        let mut records = self
            .score_all(candidates)
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        rank(&mut records);
        Ok(records)
    }

    /// Like `match_many`, but inputs that failed upstream or while scoring
    /// are reported as failures instead of aborting the batch
    pub fn screen<I>(&self, inputs: I) -> ScreeningBatch
    where
        I: IntoIterator<Item = (String, Result<String>)>,
    {
        let mut failures = Vec::new();
        let mut candidates = Vec::new();

        for (identifier, text) in inputs {
            match text {
                Ok(text) => candidates.push(CandidateInput::new(identifier, text)),
                Err(e) => {
                    warn!("Skipping {}: {}", identifier, e);
                    failures.push(CandidateFailure {
                        identifier,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut records = Vec::with_capacity(candidates.len());
        for (candidate, result) in candidates.iter().zip(self.score_all(&candidates)) {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Failed to score {}: {}", candidate.identifier, e);
                    failures.push(CandidateFailure {
                        identifier: candidate.identifier.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        rank(&mut records);
        info!(
            "Screened {} candidates ({} failed)",
            records.len(),
            failures.len()
        );

        ScreeningBatch { records, failures }
    }

    /// Scores in submission order, spread across scoped worker threads
    fn score_all(&self, candidates: &[CandidateInput]) -> Vec<Result<MatchRecord>> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(candidates.len());
        let chunk_size = candidates.len().div_ceil(workers);

        std::thread::scope(|scope| {
            let handles: Vec<_> = candidates
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|c| self.match_one(&c.identifier, &c.text))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        })
    }
}

/// Stable sort, highest score first
fn rank(records: &mut [MatchRecord]) {
    records.sort_by(|a, b| b.score.total_cmp(&a.score));
}
