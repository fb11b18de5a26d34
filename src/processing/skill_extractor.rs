//! Tiered competency extraction
//!
//! Candidate lines are chosen by the first tier that yields any:
//! a skills section, then bullet/label lines, then lines with indicator
//! words, then the whole text. Vocabulary phrases are matched only against
//! the chosen lines, so a skill-like surname in a header is not picked up
//! when the document carries an explicit skill list.

use crate::error::{Result, ScreenerError};
use crate::processing::vocabulary::Vocabulary;
use aho_corasick::AhoCorasick;
use log::debug;
use regex::{RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const SECTION_HEADER_INDICATORS: [&str; 5] =
    ["skill", "technical", "expertise", "competenc", "proficienc"];
const SECTION_TERMINATORS: [&str; 3] = ["experience", "education", "project"];
const SKILL_INDICATOR_WORDS: [&str; 5] =
    ["proficient", "experienced", "skilled", "knowledge", "ability"];
const BULLET_GLYPHS: [char; 4] = ['-', '*', '•', '·'];
// one pattern per phrase with Unicode boundary classes outgrows regex's 10 MiB default
const PATTERN_SIZE_LIMIT: usize = 64 << 20;

static HEADER_MATCHER: LazyLock<AhoCorasick> =
    LazyLock::new(|| AhoCorasick::new(SECTION_HEADER_INDICATORS).expect("Invalid header patterns"));
static TERMINATOR_MATCHER: LazyLock<AhoCorasick> =
    LazyLock::new(|| AhoCorasick::new(SECTION_TERMINATORS).expect("Invalid terminator patterns"));
static INDICATOR_MATCHER: LazyLock<AhoCorasick> =
    LazyLock::new(|| AhoCorasick::new(SKILL_INDICATOR_WORDS).expect("Invalid indicator patterns"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionTier {
    Section,
    BulletOrLabel,
    IndicatorWord,
    WholeText,
}

impl ExtractionTier {
    /// Precedence order; the first tier with candidate lines wins
    pub const ORDER: [ExtractionTier; 4] = [
        ExtractionTier::Section,
        ExtractionTier::BulletOrLabel,
        ExtractionTier::IndicatorWord,
        ExtractionTier::WholeText,
    ];

    /// Candidate lines this tier selects from lowercased lines
    pub fn select<'a>(&self, lines: &[&'a str]) -> Vec<&'a str> {
        match self {
            ExtractionTier::Section => section_lines(lines),
            ExtractionTier::BulletOrLabel => bullet_or_label_lines(lines),
            ExtractionTier::IndicatorWord => indicator_word_lines(lines),
            ExtractionTier::WholeText => lines.to_vec(),
        }
    }
}

impl std::fmt::Display for ExtractionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionTier::Section => write!(f, "skills section"),
            ExtractionTier::BulletOrLabel => write!(f, "bullet/label lines"),
            ExtractionTier::IndicatorWord => write!(f, "indicator-word lines"),
            ExtractionTier::WholeText => write!(f, "whole text"),
        }
    }
}

/// Lines following the first section header that yields content, up to a
/// blank line or a line naming another section
fn section_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let mut block = Vec::new();
    let mut in_section = false;

    for &line in lines {
        if HEADER_MATCHER.is_match(line) {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }
        if line.trim().is_empty() || TERMINATOR_MATCHER.is_match(line) {
            in_section = false;
            if !block.is_empty() {
                break;
            }
        } else {
            block.push(line);
        }
    }

    block
}

fn bullet_or_label_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .copied()
        .filter(|line| line.trim_start().starts_with(BULLET_GLYPHS) || line.contains(':'))
        .collect()
}

fn indicator_word_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .copied()
        .filter(|line| INDICATOR_MATCHER.is_match(line))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillExtraction {
    pub tier: ExtractionTier,
    /// Deduplicated, in vocabulary order
    pub skills: Vec<String>,
}

/// Matches a fixed vocabulary against the skill-bearing part of a text
pub struct SkillExtractor {
    vocabulary: Vocabulary,
    patterns: RegexSet,
}

impl SkillExtractor {
    pub fn new(vocabulary: Vocabulary) -> Result<Self> {
        if vocabulary.is_empty() {
            return Err(ScreenerError::Configuration(
                "Skill extractor needs a non-empty vocabulary".to_string(),
            ));
        }

        // any non-word character (or either end) delimits a phrase
        let patterns: Vec<String> = vocabulary
            .iter_phrases()
            .map(|phrase| format!(r"(?:^|\W){}(?:\W|$)", regex::escape(phrase)))
            .collect();

        let patterns = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .dfa_size_limit(PATTERN_SIZE_LIMIT)
            .build()?;

        debug!("Skill extractor built with {} phrases", vocabulary.len());

        Ok(Self { vocabulary, patterns })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        self.extract_detailed(text).skills
    }

    pub fn extract_detailed(&self, text: &str) -> SkillExtraction {
        let lowered = text.to_lowercase();
        let lines: Vec<&str> = lowered.split('\n').collect();

        let (tier, selected) = ExtractionTier::ORDER
            .iter()
            .map(|tier| (*tier, tier.select(&lines)))
            .find(|(_, selected)| !selected.is_empty())
            .unwrap_or((ExtractionTier::WholeText, Vec::new()));

        let skill_text = selected.join(" ");
        let matched = self.patterns.matches(&skill_text);

        // phrases are unique, so set-index order is deduplicated vocabulary order
        let skills: Vec<String> = self
            .vocabulary
            .iter_phrases()
            .enumerate()
            .filter(|(idx, _)| matched.matched(*idx))
            .map(|(_, phrase)| phrase.to_string())
            .collect();

        debug!("Extracted {} skills from {}", skills.len(), tier);

        SkillExtraction { tier, skills }
    }

    /// Extracted skills grouped by vocabulary category, categories in order
    pub fn group_by_category<'a>(&'a self, skills: &[String]) -> Vec<(&'a str, Vec<String>)> {
        self.vocabulary
            .categories()
            .iter()
            .filter_map(|category| {
                let found: Vec<String> = category
                    .phrases
                    .iter()
                    .filter(|p| skills.contains(p))
                    .cloned()
                    .collect();
                (!found.is_empty()).then_some((category.name.as_str(), found))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(Vocabulary::builtin()).unwrap()
    }

    #[test]
    fn test_builtin_vocabulary_builds() {
        let vocabulary = Vocabulary::builtin();
        let phrases = vocabulary.len();
        let extractor = SkillExtractor::new(vocabulary).unwrap();
        assert_eq!(extractor.vocabulary().len(), phrases);
        assert_eq!(extractor.extract("Skills:\n- Rust\n- Kafka"), vec!["rust", "kafka"]);
    }

    #[test]
    fn test_unicode_punctuation_delimits_phrases() {
        let skills = extractor().extract("Skills: Rust — Kafka · Docker");
        assert_eq!(skills, vec!["rust", "docker", "kafka"]);
    }

    #[test]
    fn test_name_collision_excluded_when_skills_section_present() {
        let text = "John Python\nSoftware Engineer\n\nExperienced in JavaScript and React.\nSkills:\n- JavaScript\n- React";
        let extraction = extractor().extract_detailed(text);
        assert_eq!(extraction.tier, ExtractionTier::Section);
        assert_eq!(extraction.skills, vec!["javascript", "react"]);
    }

    #[test]
    fn test_skills_header_includes_listed_phrases() {
        let text = "Jane Developer\nSenior Developer\n\nSkills:\n- Python\n- Django";
        let skills = extractor().extract(text);
        assert!(skills.contains(&"python".to_string()));
        assert!(skills.contains(&"django".to_string()));
    }

    #[test]
    fn test_section_closes_at_terminator() {
        let text = "Technical Skills\nRust, Kafka\nExperience\nPython scripting at Acme";
        let skills = extractor().extract(text);
        assert_eq!(skills, vec!["rust", "kafka"]);
    }

    #[test]
    fn test_empty_section_keeps_scanning() {
        let text = "Strong problem-solving skills\n\nSkills:\n- Docker\n- AWS";
        let skills = extractor().extract(text);
        assert_eq!(skills, vec!["aws", "docker"]);
    }

    #[test]
    fn test_prefix_sharing_phrases_kept_apart() {
        let skills = extractor().extract("Skills:\n- JavaScript\n- TypeScript");
        assert!(skills.contains(&"javascript".to_string()));
        assert!(!skills.contains(&"java".to_string()));

        let skills = extractor().extract("Skills:\n- C++, Go and C#");
        assert_eq!(skills, vec!["c++", "c#", "go"]);
    }

    #[test]
    fn test_bullet_tier() {
        let extraction = extractor().extract_detailed("Alex Rivera\n* Kubernetes\n* Terraform");
        assert_eq!(extraction.tier, ExtractionTier::BulletOrLabel);
        assert_eq!(extraction.skills, vec!["kubernetes", "terraform"]);
    }

    #[test]
    fn test_indicator_tier() {
        let text = "Sam Lee\nProficient in Tableau and Excel\nEnjoys hiking with Docker the dog";
        let extraction = extractor().extract_detailed(text);
        assert_eq!(extraction.tier, ExtractionTier::IndicatorWord);
        assert_eq!(extraction.skills, vec!["tableau", "excel"]);
    }

    #[test]
    fn test_whole_text_fallback() {
        let extraction = extractor().extract_detailed("Built dashboards in Tableau for the sales team");
        assert_eq!(extraction.tier, ExtractionTier::WholeText);
        assert_eq!(extraction.skills, vec!["tableau"]);
    }

    #[test]
    fn test_no_skills_in_degenerate_text() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("Sarah Smith\nMarketing Manager").is_empty());
    }

    #[test]
    fn test_group_by_category() {
        let extractor = extractor();
        let skills = vec!["python".to_string(), "docker".to_string(), "leadership".to_string()];
        let grouped = extractor.group_by_category(&skills);
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].0, "Programming Languages");
        assert_eq!(grouped[2], ("Soft Skills", vec!["leadership".to_string()]));
    }
}
