//! Lexical similarity over key-term sets (Jaccard blended with term-count cosine)

use crate::config::LexicalConfig;
use crate::processing::text_processor::{KeyTermExtractor, TextNormalizer};
use std::collections::{HashMap, HashSet};

pub struct LexicalSimilarity {
    normalizer: TextNormalizer,
    extractor: KeyTermExtractor,
    jaccard_weight: f64,
    cosine_weight: f64,
}

impl Default for LexicalSimilarity {
    fn default() -> Self {
        Self::new(&LexicalConfig::default())
    }
}

impl LexicalSimilarity {
    pub fn new(config: &LexicalConfig) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            extractor: KeyTermExtractor::new(config.top_n),
            jaccard_weight: config.jaccard_weight,
            cosine_weight: config.cosine_weight,
        }
    }

    /// Key terms of raw text, after normalization
    pub fn key_terms(&self, text: &str) -> Vec<String> {
        self.extractor.extract(&self.normalizer.normalize(text))
    }

    /// Similarity of two raw texts in [0, 1]
    ///
    /// Key terms are longer than two characters, so a text made only of short
    /// terms ("go ai ml") has no key terms and scores 0.0, even against itself.
    pub fn similarity(&self, text1: &str, text2: &str) -> f64 {
        let terms1 = self.key_terms(text1);
        let terms2 = self.key_terms(text2);
        self.similarity_of_terms(&terms1, &terms2)
    }

    pub fn similarity_of_terms(&self, terms1: &[String], terms2: &[String]) -> f64 {
        let jaccard = jaccard(terms1, terms2);
        let cosine = term_count_cosine(terms1, terms2);

        self.jaccard_weight * jaccard + self.cosine_weight * cosine
    }
}

/// |A ∩ B| / |A ∪ B|, 0.0 for an empty union
pub fn jaccard(terms1: &[String], terms2: &[String]) -> f64 {
    let set1: HashSet<&String> = terms1.iter().collect();
    let set2: HashSet<&String> = terms2.iter().collect();

    let union = set1.union(&set2).count();
    if union == 0 {
        return 0.0;
    }

    set1.intersection(&set2).count() as f64 / union as f64
}

/// Cosine of term multiplicities: shared-term dot product over the full magnitudes
pub fn term_count_cosine(terms1: &[String], terms2: &[String]) -> f64 {
    let counts1 = count_terms(terms1);
    let counts2 = count_terms(terms2);

    let dot_product: f64 = counts1
        .iter()
        .filter_map(|(term, &c1)| counts2.get(term).map(|&c2| c1 * c2))
        .sum();

    let magnitude1 = counts1.values().map(|c| c * c).sum::<f64>().sqrt();
    let magnitude2 = counts2.values().map(|c| c * c).sum::<f64>().sqrt();

    if magnitude1 == 0.0 || magnitude2 == 0.0 {
        0.0
    } else {
        dot_product / (magnitude1 * magnitude2)
    }
}

fn count_terms(terms: &[String]) -> HashMap<&str, f64> {
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}
