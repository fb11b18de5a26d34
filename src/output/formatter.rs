//! Output formatters for screening reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ScreeningReport;
use crate::processing::scoring::Decision;
use colored::{Color, Colorize};

/// Trait for rendering a screening report. Formatters print records in the
/// order they are given and never re-rank them.
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and a ranked table
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter; scores keep full precision
pub struct JsonFormatter {
    pretty: bool,
}

/// Picks the formatter for the requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

const ID_WIDTH: usize = 28;

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_decision(&self, decision: Decision) -> String {
        let color = match decision {
            Decision::Fit => Color::Green,
            Decision::PotentialFit => Color::Yellow,
            Decision::NotFit => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", decision.as_str().color(color).bold())
        } else {
            format!("[{}]", decision.as_str())
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME SCREENING REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Job: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.job_source
        ));
        if !report.required_competencies.is_empty() {
            output.push_str(&format!(
                "Required competencies: {}\n",
                self.colorize(&report.required_competencies.join(", "), Color::Cyan)
            ));
        }

        output.push_str(&self.format_header("Ranking", 2));
        if report.records.is_empty() {
            output.push_str("No candidates were scored.\n");
        }

        for (i, record) in report.records.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {:<width$} {:>8} {}\n",
                i + 1,
                truncate(&record.candidate_id, ID_WIDTH),
                record.score_percentage(),
                self.format_decision(record.decision),
                width = ID_WIDTH
            ));

            if !record.competencies.is_empty() {
                output.push_str(&format!("     Skills: {}\n", record.competencies_joined()));
            }

            if self.detailed {
                output.push_str(&format!(
                    "     Cosine: {:.2}% | Euclidean: {:.2}% | Lexical: {:.2}%\n",
                    record.metrics.cosine * 100.0,
                    record.metrics.euclidean * 100.0,
                    record.metrics.lexical * 100.0
                ));
                if !record.missing_competencies.is_empty() {
                    output.push_str(&format!(
                        "     Missing: {}\n",
                        self.colorize(&record.missing_joined(), Color::Yellow)
                    ));
                }
            }
        }

        output.push_str(&format!(
            "\nFit: {} | Potential Fit: {} | Not Fit: {}\n",
            report.count_by_decision(Decision::Fit),
            report.count_by_decision(Decision::PotentialFit),
            report.count_by_decision(Decision::NotFit)
        ));

        if !report.failures.is_empty() {
            output.push_str(&self.format_header("Skipped", 3));
            for failure in &report.failures {
                output.push_str(&format!(
                    "  • {} {}\n",
                    self.colorize(&failure.identifier, Color::Red),
                    self.colorize(&format!("({})", failure.reason), Color::BrightBlack)
                ));
            }
        }

        if self.detailed {
            let weights = &report.weights;
            output.push_str(&format!(
                "\nWeights: cosine {:.2}, euclidean {:.2}, lexical {:.2} | Fit > {:.2}, Potential Fit > {:.2}\n",
                weights.cosine_weight,
                weights.euclidean_weight,
                weights.lexical_weight,
                weights.fit_threshold,
                weights.potential_fit_threshold
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true, false)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::processing::document::{CandidateFailure, MatchRecord, ScreeningBatch};
    use crate::processing::scoring::MetricScores;

    fn sample_report() -> ScreeningReport {
        let records = vec![
            MatchRecord {
                candidate_id: "alex.txt".to_string(),
                score: 0.612345,
                metrics: MetricScores { cosine: 0.7, euclidean: 0.6, lexical: 0.3 },
                competencies: vec!["python".to_string()],
                missing_competencies: vec!["sql".to_string()],
                decision: Decision::Fit,
            },
            MatchRecord {
                candidate_id: "sam.txt".to_string(),
                score: 0.1,
                metrics: MetricScores { cosine: 0.1, euclidean: 0.2, lexical: 0.0 },
                competencies: Vec::new(),
                missing_competencies: vec!["python".to_string(), "sql".to_string()],
                decision: Decision::NotFit,
            },
        ];
        let batch = ScreeningBatch {
            records,
            failures: vec![CandidateFailure {
                identifier: "cv.pdf".to_string(),
                reason: "File format not supported: cv.pdf".to_string(),
            }],
        };
        ScreeningReport::new(
            "job.txt",
            vec!["python".to_string(), "sql".to_string()],
            batch,
            ScoringConfig::default(),
        )
    }

    #[test]
    fn test_console_keeps_order_and_rounds() {
        let output = ConsoleFormatter::new(false, false)
            .format_report(&sample_report())
            .unwrap();
        let alex = output.find("alex.txt").unwrap();
        let sam = output.find("sam.txt").unwrap();
        assert!(alex < sam);
        assert!(output.contains("61.23%"));
        assert!(output.contains("[Fit]"));
        assert!(output.contains("[Not Fit]"));
        assert!(output.contains("cv.pdf"));
        assert!(!output.contains("Missing:"));
    }

    #[test]
    fn test_console_detailed_shows_metrics() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&sample_report())
            .unwrap();
        assert!(output.contains("Cosine: 70.00%"));
        assert!(output.contains("Missing: sql"));
        assert!(output.contains("Weights: cosine 0.60"));
    }

    #[test]
    fn test_json_full_precision() {
        let output = ReportGenerator::new(false, false)
            .generate_report(&sample_report(), OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["records"][0]["score"].as_f64(), Some(0.612345));
        assert_eq!(value["records"][0]["decision"], "Fit");
        assert_eq!(value["records"][1]["candidate_id"], "sam.txt");
        assert_eq!(value["failures"][0]["identifier"], "cv.pdf");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-identifier", 10), "a-very-...");
    }
}
