//! Bounded-vocabulary TF-IDF vector space fitted to a reference document

use crate::config::VectorSpaceConfig;
use crate::error::{Result, ScreenerError};
use crate::processing::stop_words::VECTOR_STOP_WORDS;
use log::debug;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid token regex"));

#[derive(Debug, Clone)]
struct FittedVocabulary {
    /// term -> dimension, dimensions in lexicographic term order
    index: HashMap<String, usize>,
    idf: Vec<f64>,
}

/// Vocabulary and weights are fixed by `fit`; `transform` never adds terms
#[derive(Debug, Clone)]
pub struct VectorSpaceModel {
    config: VectorSpaceConfig,
    fitted: Option<FittedVocabulary>,
}

impl Default for VectorSpaceModel {
    fn default() -> Self {
        Self::new(VectorSpaceConfig::default())
    }
}

impl VectorSpaceModel {
    pub fn new(config: VectorSpaceConfig) -> Self {
        Self { config, fitted: None }
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Number of dimensions, 0 before fit
    pub fn dimensions(&self) -> usize {
        self.fitted.as_ref().map_or(0, |f| f.idf.len())
    }

    pub fn vocabulary(&self) -> Vec<&str> {
        let Some(fitted) = &self.fitted else {
            return Vec::new();
        };
        let mut terms: Vec<(&str, usize)> =
            fitted.index.iter().map(|(t, &i)| (t.as_str(), i)).collect();
        terms.sort_by_key(|&(_, i)| i);
        terms.into_iter().map(|(t, _)| t).collect()
    }

    /// Fit on one reference document
    pub fn fit(&mut self, reference: &str) -> Result<()> {
        self.fit_corpus(&[reference])
    }

    /// Fit on a corpus. May only be called once per model.
    pub fn fit_corpus(&mut self, documents: &[&str]) -> Result<()> {
        if self.fitted.is_some() {
            return Err(ScreenerError::InvalidState(
                "Vector space model is already fitted".to_string(),
            ));
        }

        let n = documents.len() as f64;
        let mut total_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for document in documents {
            let terms = self.analyze(document);
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in terms {
                *total_counts.entry(term).or_insert(0) += 1;
            }
        }

        // a single-document corpus always satisfies the bound
        let max_doc_count = (self.config.max_df * n).max(1.0);
        let mut candidates: Vec<(String, usize)> = total_counts
            .into_iter()
            .filter(|(term, _)| doc_freq[term] as f64 <= max_doc_count)
            .collect();

        if candidates.len() > self.config.max_features {
            candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            candidates.truncate(self.config.max_features);
        }

        let ordered: BTreeMap<String, usize> = candidates.into_iter().collect();
        let mut index = HashMap::with_capacity(ordered.len());
        let mut idf = Vec::with_capacity(ordered.len());

        for (dimension, term) in ordered.into_keys().enumerate() {
            let df = doc_freq[&term] as f64;
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
            index.insert(term, dimension);
        }

        debug!("Vector space fitted with {} terms", idf.len());
        self.fitted = Some(FittedVocabulary { index, idf });
        Ok(())
    }

    /// Project text onto the fitted vocabulary as an L2-normalised weight vector
    pub fn transform(&self, text: &str) -> Result<Vec<f64>> {
        let fitted = self.require_fitted()?;

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(text) {
            if let Some(&dimension) = fitted.index.get(&term) {
                *counts.entry(dimension).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = vec![0.0; fitted.idf.len()];
        for (dimension, tf) in counts {
            let tf = if self.config.sublinear_tf { 1.0 + tf.ln() } else { tf };
            vector[dimension] = tf * fitted.idf[dimension];
        }

        normalize(&mut vector);
        Ok(vector)
    }

    /// Normalised dot product; 0.0 when either vector is all zeros
    pub fn cosine(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        self.check_dimensions(a, b)?;

        let dot_product: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
        let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            Ok(0.0)
        } else {
            Ok((dot_product / (norm_a * norm_b)).clamp(0.0, 1.0))
        }
    }

    /// `1 / (1 + distance)`; 0.0 for an empty vocabulary
    pub fn euclidean_similarity(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        self.check_dimensions(a, b)?;
        if a.is_empty() {
            return Ok(0.0);
        }

        let distance = a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt();

        Ok(1.0 / (1.0 + distance))
    }

    /// Lowercase, tokenize, drop stop words, emit n-grams up to `ngram_max`
    fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = TOKEN_REGEX
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !VECTOR_STOP_WORDS.contains(t))
            .collect();

        let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        for n in 2..=self.config.ngram_max {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    fn require_fitted(&self) -> Result<&FittedVocabulary> {
        self.fitted.as_ref().ok_or_else(|| {
            ScreenerError::InvalidState("Vector space model used before fit".to_string())
        })
    }

    fn check_dimensions(&self, a: &[f64], b: &[f64]) -> Result<()> {
        let fitted = self.require_fitted()?;
        if a.len() != fitted.idf.len() || b.len() != fitted.idf.len() {
            return Err(ScreenerError::InvalidInput(format!(
                "Vector dimensions don't match the fitted vocabulary: {} and {} vs {}",
                a.len(),
                b.len(),
                fitted.idf.len()
            )));
        }
        Ok(())
    }
}

fn normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted(reference: &str) -> VectorSpaceModel {
        let mut model = VectorSpaceModel::default();
        model.fit(reference).unwrap();
        model
    }

    #[test]
    fn test_unfitted_model_rejects_use() {
        let model = VectorSpaceModel::default();
        assert!(matches!(model.transform("rust"), Err(ScreenerError::InvalidState(_))));
        assert!(matches!(model.cosine(&[], &[]), Err(ScreenerError::InvalidState(_))));
        assert!(matches!(
            model.euclidean_similarity(&[], &[]),
            Err(ScreenerError::InvalidState(_))
        ));
    }

    #[test]
    fn test_fit_once() {
        let mut model = fitted("rust engineer");
        assert!(matches!(model.fit("python"), Err(ScreenerError::InvalidState(_))));
    }

    #[test]
    fn test_vocabulary_has_unigrams_and_bigrams() {
        let model = fitted("The Rust engineer writes Rust services");
        assert_eq!(
            model.vocabulary(),
            vec!["engineer", "engineer writes", "rust", "rust engineer", "rust services", "services", "writes", "writes rust"]
        );
    }

    #[test]
    fn test_unknown_terms_contribute_nothing() {
        let model = fitted("rust kafka storage");
        let vector = model.transform("haskell elixir erlang").unwrap();
        assert!(vector.iter().all(|&x| x == 0.0));
        assert_eq!(model.dimensions(), 5);
    }

    #[test]
    fn test_self_similarity() {
        let reference = "distributed storage engine written in rust";
        let model = fitted(reference);
        let a = model.transform(reference).unwrap();
        assert!((model.cosine(&a, &a).unwrap() - 1.0).abs() < 1e-9);
        assert!((model.euclidean_similarity(&a, &a).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_candidate() {
        let model = fitted("distributed storage engine");
        let a = model.transform("distributed storage engine").unwrap();
        let b = model.transform("gardening").unwrap();
        assert_eq!(model.cosine(&a, &b).unwrap(), 0.0);
        assert!((model.euclidean_similarity(&a, &b).unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_partial_overlap_between_zero_and_one() {
        let model = fitted("rust kafka postgres kubernetes");
        let a = model.transform("rust kafka postgres kubernetes").unwrap();
        let b = model.transform("rust and kafka").unwrap();
        let cosine = model.cosine(&a, &b).unwrap();
        assert!(cosine > 0.0 && cosine < 1.0);
        let euclidean = model.euclidean_similarity(&a, &b).unwrap();
        assert!(euclidean > 0.5 && euclidean < 1.0);
    }

    #[test]
    fn test_max_features_cap() {
        let config = VectorSpaceConfig { max_features: 2, ngram_max: 1, ..VectorSpaceConfig::default() };
        let mut model = VectorSpaceModel::new(config);
        model.fit("rust rust rust kafka kafka zig").unwrap();
        assert_eq!(model.vocabulary(), vec!["kafka", "rust"]);
    }

    #[test]
    fn test_empty_reference_is_degenerate() {
        let model = fitted("the and of");
        let a = model.transform("the and of").unwrap();
        let b = model.transform("rust").unwrap();
        assert_eq!(model.cosine(&a, &b).unwrap(), 0.0);
        assert_eq!(model.euclidean_similarity(&a, &b).unwrap(), 0.0);
    }
}
