//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub vector_space: VectorSpaceConfig,
    pub lexical: LexicalConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub cosine_weight: f64,
    pub euclidean_weight: f64,
    pub lexical_weight: f64,
    pub fit_threshold: f64,
    pub potential_fit_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorSpaceConfig {
    pub max_features: usize,
    pub max_df: f64,
    pub ngram_max: usize,
    pub sublinear_tf: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LexicalConfig {
    pub top_n: usize,
    pub jaccard_weight: f64,
    pub cosine_weight: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// TOML vocabulary file; the built-in vocabulary is used when absent
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            cosine_weight: 0.6,
            euclidean_weight: 0.2,
            lexical_weight: 0.2,
            fit_threshold: 0.5,
            potential_fit_threshold: 0.3,
        }
    }
}

impl Default for VectorSpaceConfig {
    fn default() -> Self {
        Self {
            max_features: 10_000,
            max_df: 0.8,
            ngram_max: 2,
            sublinear_tf: true,
        }
    }
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            top_n: 20,
            jaccard_weight: 0.4,
            cosine_weight: 0.6,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            vector_space: VectorSpaceConfig::default(),
            lexical: LexicalConfig::default(),
            vocabulary: VocabularyConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    /// Reject weights and thresholds the scorer cannot work with
    pub fn validate(&self) -> Result<()> {
        let s = &self.scoring;
        for (name, value) in [
            ("scoring.cosine_weight", s.cosine_weight),
            ("scoring.euclidean_weight", s.euclidean_weight),
            ("scoring.lexical_weight", s.lexical_weight),
            ("scoring.fit_threshold", s.fit_threshold),
            ("scoring.potential_fit_threshold", s.potential_fit_threshold),
            ("lexical.jaccard_weight", self.lexical.jaccard_weight),
            ("lexical.cosine_weight", self.lexical.cosine_weight),
            ("vector_space.max_df", self.vector_space.max_df),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScreenerError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let scoring_sum = s.cosine_weight + s.euclidean_weight + s.lexical_weight;
        if (scoring_sum - 1.0).abs() > 1e-6 {
            return Err(ScreenerError::Configuration(format!(
                "Scoring weights must sum to 1.0, got {}",
                scoring_sum
            )));
        }

        let lexical_sum = self.lexical.jaccard_weight + self.lexical.cosine_weight;
        if (lexical_sum - 1.0).abs() > 1e-6 {
            return Err(ScreenerError::Configuration(format!(
                "Lexical weights must sum to 1.0, got {}",
                lexical_sum
            )));
        }

        if s.potential_fit_threshold > s.fit_threshold {
            return Err(ScreenerError::Configuration(
                "potential_fit_threshold must not exceed fit_threshold".to_string(),
            ));
        }

        if self.vector_space.max_features == 0 || self.lexical.top_n == 0 {
            return Err(ScreenerError::Configuration(
                "max_features and top_n must be positive".to_string(),
            ));
        }

        if self.vector_space.ngram_max == 0 {
            return Err(ScreenerError::Configuration(
                "ngram_max must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring.cosine_weight, 0.6);
        assert_eq!(config.lexical.top_n, 20);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = Config::default();
        config.scoring.lexical_weight = 0.5;
        assert!(matches!(config.validate(), Err(ScreenerError::Configuration(_))));
    }

    #[test]
    fn test_threshold_order() {
        let mut config = Config::default();
        config.scoring.potential_fit_threshold = 0.7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_defaults() {
        let config = Config::default();
        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.scoring, config.scoring);
        assert_eq!(parsed.vector_space, config.vector_space);
        assert!(parsed.vocabulary.path.is_none());
    }
}
