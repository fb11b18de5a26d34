//! Competency vocabulary: ordered phrases grouped by category

use crate::config::VocabularyConfig;
use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub phrases: Vec<String>,
}

/// Immutable once constructed; phrases are lowercase, trimmed and unique
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vocabulary {
    categories: Vec<SkillCategory>,
}

#[derive(Deserialize)]
struct VocabularyFile {
    #[serde(default)]
    categories: Vec<SkillCategory>,
}

impl Vocabulary {
    pub fn new(categories: Vec<SkillCategory>) -> Result<Self> {
        if categories.is_empty() {
            return Err(ScreenerError::Configuration(
                "Vocabulary has no categories".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(categories.len());

        for category in categories {
            let name = category.name.trim().to_string();
            if name.is_empty() {
                return Err(ScreenerError::Configuration(
                    "Vocabulary category has an empty name".to_string(),
                ));
            }
            if category.phrases.is_empty() {
                return Err(ScreenerError::Configuration(format!(
                    "Vocabulary category '{}' has no phrases",
                    name
                )));
            }

            let mut phrases = Vec::with_capacity(category.phrases.len());
            for phrase in category.phrases {
                let phrase = phrase.trim().to_lowercase();
                if phrase.is_empty() {
                    return Err(ScreenerError::Configuration(format!(
                        "Vocabulary category '{}' contains a blank phrase",
                        name
                    )));
                }
                if !seen.insert(phrase.clone()) {
                    return Err(ScreenerError::Configuration(format!(
                        "Duplicate vocabulary phrase '{}'",
                        phrase
                    )));
                }
                phrases.push(phrase);
            }

            normalized.push(SkillCategory { name, phrases });
        }

        Ok(Self { categories: normalized })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: VocabularyFile = toml::from_str(content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse vocabulary: {}", e)))?;
        Self::new(file.categories)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScreenerError::Configuration(format!(
                "Failed to read vocabulary '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// The vocabulary file named in the config, or the built-in one
    pub fn from_config(config: &VocabularyConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    /// Phrases in category order, then declaration order
    pub fn iter_phrases(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories
            .iter()
            .flat_map(|c| c.phrases.iter().map(String::as_str))
    }

    pub fn category_of(&self, phrase: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.phrases.iter().any(|p| p == phrase))
            .map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.phrases.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Built-in technology and soft-skill vocabulary
    pub fn builtin() -> Self {
        let table: [(&str, &[&str]); 9] = [
            ("Programming Languages", &[
                "python", "java", "javascript", "c++", "c#", "ruby", "php", "swift", "kotlin",
                "go", "rust", "scala", "r", "matlab", "sql", "typescript", "dart", "perl",
                "shell", "bash",
            ]),
            ("Web Technologies", &[
                "html", "css", "react", "angular", "vue", "node", "django", "flask", "spring",
                "express", "asp.net", "jquery", "bootstrap", "sass", "less", "webpack", "npm",
                "rest", "graphql",
            ]),
            ("Databases", &[
                "mysql", "postgresql", "mongodb", "oracle", "sql server", "redis",
                "elasticsearch", "cassandra", "firebase", "dynamodb", "sqlite",
            ]),
            ("Machine Learning & AI", &[
                "machine learning", "deep learning", "neural networks", "tensorflow", "pytorch",
                "keras", "scikit-learn", "pandas", "numpy", "matplotlib", "seaborn", "opencv",
                "nltk", "spacy", "computer vision", "natural language processing",
                "reinforcement learning", "xgboost", "data science", "artificial intelligence",
                "data mining", "predictive modeling",
            ]),
            ("Cloud & DevOps", &[
                "aws", "azure", "google cloud", "docker", "kubernetes", "jenkins", "git",
                "github", "gitlab", "ci/cd", "terraform", "ansible", "puppet", "chef",
                "openshift", "heroku", "serverless", "lambda", "ec2", "s3", "gcp",
                "cloudformation",
            ]),
            ("Data & Analytics", &[
                "data analysis", "data visualization", "tableau", "power bi", "excel",
                "statistics", "hadoop", "spark", "hive", "pig", "kafka", "airflow", "etl",
                "big data",
            ]),
            ("Mobile Development", &[
                "android", "ios", "flutter", "react native", "xamarin", "ionic", "cordova",
            ]),
            ("Software Engineering", &[
                "agile", "scrum", "kanban", "jira", "confluence", "testing", "unit testing",
                "integration testing", "test automation", "selenium", "junit", "pytest",
                "object-oriented programming", "design patterns", "software architecture",
                "microservices", "api development", "debugging", "refactoring",
            ]),
            ("Soft Skills", &[
                "communication", "leadership", "teamwork", "problem solving",
                "critical thinking", "project management", "time management", "adaptability",
                "creativity", "attention to detail", "customer service", "negotiation",
                "mentoring",
            ]),
        ];

        let categories = table
            .iter()
            .map(|(name, phrases)| SkillCategory {
                name: name.to_string(),
                phrases: phrases.iter().map(|p| p.to_string()).collect(),
            })
            .collect();

        // the table above is unique and non-empty
        Self { categories }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_passes_validation() {
        let builtin = Vocabulary::builtin();
        let rebuilt = Vocabulary::new(builtin.categories().to_vec()).unwrap();
        assert_eq!(rebuilt, builtin);
        assert!(builtin.len() > 100);
        assert_eq!(builtin.category_of("docker"), Some("Cloud & DevOps"));
        assert_eq!(builtin.iter_phrases().next(), Some("python"));
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        assert!(matches!(
            Vocabulary::new(Vec::new()),
            Err(ScreenerError::Configuration(_))
        ));
        assert!(Vocabulary::from_toml_str("").is_err());
    }

    #[test]
    fn test_malformed_categories_rejected() {
        let blank = vec![SkillCategory {
            name: "Languages".to_string(),
            phrases: vec!["rust".to_string(), "  ".to_string()],
        }];
        assert!(Vocabulary::new(blank).is_err());

        let duplicate = vec![
            SkillCategory { name: "A".to_string(), phrases: vec!["Rust".to_string()] },
            SkillCategory { name: "B".to_string(), phrases: vec!["rust".to_string()] },
        ];
        assert!(Vocabulary::new(duplicate).is_err());

        let no_phrases = vec![SkillCategory { name: "A".to_string(), phrases: Vec::new() }];
        assert!(Vocabulary::new(no_phrases).is_err());
    }

    #[test]
    fn test_from_toml() {
        let content = r#"
            [[categories]]
            name = "Languages"
            phrases = ["Rust", "Go"]

            [[categories]]
            name = "Storage"
            phrases = ["rocksdb"]
        "#;
        let vocabulary = Vocabulary::from_toml_str(content).unwrap();
        let phrases: Vec<&str> = vocabulary.iter_phrases().collect();
        assert_eq!(phrases, vec!["rust", "go", "rocksdb"]);
        assert_eq!(vocabulary.category_of("rocksdb"), Some("Storage"));
    }
}
