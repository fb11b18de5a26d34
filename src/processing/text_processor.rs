//! Text normalization and key-term extraction

use crate::processing::lemmatizer::Lemmatizer;
use crate::processing::stop_words::NORMALIZER_STOP_WORDS;
use regex::Regex;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Lowercases, strips, tokenizes and lemmatizes free text
pub struct TextNormalizer {
    lemmatizer: Lemmatizer,
    non_letter_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let non_letter_regex = Regex::new(r"[^a-z\s]").expect("Invalid non-letter regex");
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            lemmatizer: Lemmatizer::new(),
            non_letter_regex,
            whitespace_regex,
        }
    }

    /// Full pipeline: clean, tokenize, drop stop words, lemmatize.
    /// Returns the surviving lemmas joined by single spaces.
    pub fn normalize(&self, text: &str) -> String {
        let cleaned = self.clean_text(text);

        self.tokenize(&cleaned)
            .iter()
            .map(|token| self.lemmatizer.lemmatize(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lowercase, keep only ASCII letters and whitespace, collapse whitespace
    pub fn clean_text(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let letters_only = self.non_letter_regex.replace_all(&lowered, "");
        self.whitespace_regex
            .replace_all(&letters_only, " ")
            .trim()
            .to_string()
    }

    /// Split cleaned text into word tokens, dropping stop words and punctuation
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .filter(|word| word.chars().any(char::is_alphabetic))
            .filter(|word| !NORMALIZER_STOP_WORDS.contains(word))
            .map(str::to_string)
            .collect()
    }
}

/// Frequency-ranked salient terms of normalized text
#[derive(Debug, Clone, Copy)]
pub struct KeyTermExtractor {
    top_n: usize,
}

impl Default for KeyTermExtractor {
    fn default() -> Self {
        Self::new(20)
    }
}

impl KeyTermExtractor {
    /// Terms of this many characters or fewer are discarded
    pub const MAX_DISCARDED_LEN: usize = 2;

    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// The `top_n` most frequent distinct terms, most frequent first.
    /// Ties keep first-occurrence order.
    pub fn extract(&self, normalized: &str) -> Vec<String> {
        let mut first_seen: Vec<&str> = Vec::new();
        let mut word_freq: HashMap<&str, usize> = HashMap::new();

        for token in normalized.split_whitespace() {
            if token.chars().count() <= Self::MAX_DISCARDED_LEN {
                continue;
            }
            let count = word_freq.entry(token).or_insert(0);
            if *count == 0 {
                first_seen.push(token);
            }
            *count += 1;
        }

        // stable sort keeps first-occurrence order among equal counts
        first_seen.sort_by(|a, b| word_freq[b].cmp(&word_freq[a]));

        first_seen
            .into_iter()
            .take(self.top_n)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        let normalizer = TextNormalizer::new();
        let cleaned = normalizer.clean_text("Rust 2021,  C++ &\n\tPython!!");
        assert_eq!(cleaned, "rust c python");
    }

    #[test]
    fn test_normalize_drops_stop_words_and_lemmatizes() {
        let normalizer = TextNormalizer::new();
        let normalized = normalizer.normalize("The engineers were developing REST services.");
        assert_eq!(normalized, "engineer develop rest service");
    }

    #[test]
    fn test_empty_input() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("123 !!! ..."), "");
        assert_eq!(normalizer.normalize("the and of"), "");
    }

    #[test]
    fn test_key_terms_ranked_by_frequency() {
        let extractor = KeyTermExtractor::new(3);
        let terms = extractor.extract("rust go python rust sql python rust go go go");
        // "go" is too short; ties keep first occurrence order
        assert_eq!(terms, vec!["rust", "python", "sql"]);
    }

    #[test]
    fn test_key_terms_limit() {
        let extractor = KeyTermExtractor::default();
        let text = (0..50).map(|i| format!("term{}", "x".repeat(i % 30 + 1))).collect::<Vec<_>>().join(" ");
        assert!(extractor.extract(&text).len() <= 20);
        assert!(extractor.extract("").is_empty());
    }
}
