//! Candidate profile heuristics: name, contact details, education, experience

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: String,
    pub experience_years: f64,
}

pub struct ProfileExtractor {
    name_regexes: Vec<Regex>,
    full_name_regex: Regex,
    contact_line_regex: Regex,
    email_regex: Regex,
    phone_regex: Regex,
    education_regex: Regex,
    experience_regexes: Vec<Regex>,
}

impl Default for ProfileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileExtractor {
    pub fn new() -> Self {
        let name_regexes = vec![
            Regex::new(r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").expect("Invalid name regex"),
            Regex::new(r"^([A-Z][a-z]+(?:\s+[A-Z]\.?\s*[A-Z][a-z]+)*)")
                .expect("Invalid initial name regex"),
            Regex::new(r"Name[:\s]*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)")
                .expect("Invalid labelled name regex"),
        ];

        let full_name_regex =
            Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+").expect("Invalid full name regex");

        let contact_line_regex = Regex::new(
            r"@\w+|\d{3}.*\d{3}.*\d{4}|street|road|avenue|drive|email|phone",
        )
        .expect("Invalid contact line regex");

        let email_regex =
            Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("Invalid email regex");

        let phone_regex = Regex::new(
            r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
        )
        .expect("Invalid phone regex");

        let education_regex = Regex::new(
            r"(?i)\b(?:education|university|college|degree|bachelor|master|phd)|\b(?:bs|ms|ba|ma)\b",
        )
        .expect("Invalid education regex");

        let experience_regexes = [
            r"(\d+)\+?\s*years?\s*experience",
            r"experience\s*of\s*(\d+)\+?\s*years?",
            r"(\d+)\+?\s*years?\s*(?:of\s*)?experience",
            r"experience[:\s]*(\d+)\+?\s*years?",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid experience regex"))
        .collect();

        Self {
            name_regexes,
            full_name_regex,
            contact_line_regex,
            email_regex,
            phone_regex,
            education_regex,
            experience_regexes,
        }
    }

    pub fn extract(&self, text: &str) -> CandidateProfile {
        CandidateProfile {
            name: self.extract_name(text),
            email: self.email_regex.find(text).map(|m| m.as_str().to_string()),
            phone: self.phone_regex.find(text).map(|m| m.as_str().to_string()),
            education: self.extract_education(text),
            experience_years: self.extract_experience_years(text),
        }
    }

    /// First name-like line among the first ten, skipping contact lines
    pub fn extract_name(&self, text: &str) -> String {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();

        for line in lines.iter().take(10) {
            if line.is_empty() || self.contact_line_regex.is_match(&line.to_lowercase()) {
                continue;
            }
            for regex in &self.name_regexes {
                if let Some(name) = regex.captures(line).and_then(|c| c.get(1)) {
                    return name.as_str().to_string();
                }
            }
        }

        lines
            .iter()
            .take(5)
            .find(|line| self.full_name_regex.is_match(line))
            .map(|line| line.to_string())
            .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string())
    }

    /// The first education line and up to four following non-blank lines
    pub fn extract_education(&self, text: &str) -> String {
        let lines: Vec<&str> = text.lines().collect();

        let Some(start) = lines.iter().position(|l| self.education_regex.is_match(l)) else {
            return String::new();
        };

        lines[start..(start + 5).min(lines.len())]
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Mean of every "N years experience" mention, 0.0 when there are none
    pub fn extract_experience_years(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let years: Vec<f64> = self
            .experience_regexes
            .iter()
            .flat_map(|regex| regex.captures_iter(&lowered))
            .filter_map(|c| c.get(1)?.as_str().parse::<f64>().ok())
            .collect();

        if years.is_empty() {
            0.0
        } else {
            years.iter().sum::<f64>() / years.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Alex Johnson\nEmail: alex.johnson@email.com\nPhone: (555) 123-4567\n\n\
        Senior Data Scientist with 7 years of experience in machine learning.\n\
        Education\nPhD in Computer Science, Stanford University\n\nSkills:\n- Python";

    #[test]
    fn test_extract_profile() {
        let profile = ProfileExtractor::new().extract(RESUME);
        assert_eq!(profile.name, "Alex Johnson");
        assert_eq!(profile.email.as_deref(), Some("alex.johnson@email.com"));
        assert_eq!(profile.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(profile.experience_years, 7.0);
        assert!(profile.education.starts_with("Education PhD in Computer Science"));
    }

    #[test]
    fn test_contact_lines_skipped_for_name() {
        let extractor = ProfileExtractor::new();
        let text = "jane@example.com\nJane Doe\nEngineer";
        assert_eq!(extractor.extract_name(text), "Jane Doe");
    }

    #[test]
    fn test_unknown_candidate() {
        let extractor = ProfileExtractor::new();
        assert_eq!(extractor.extract_name("12345\n---"), UNKNOWN_CANDIDATE);
        assert_eq!(extractor.extract_name(""), UNKNOWN_CANDIDATE);
    }

    #[test]
    fn test_experience_years_average() {
        let extractor = ProfileExtractor::new();
        assert_eq!(extractor.extract_experience_years("no numbers here"), 0.0);
        let years = extractor.extract_experience_years("4 years of experience, experience: 6 years");
        assert!(years > 4.0 && years < 6.0);
    }
}
