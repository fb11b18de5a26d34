//! CLI interface for the resume screener

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Rank resumes against a job description")]
#[command(
    long_about = "Score resumes against one job description with TF-IDF cosine, euclidean and key-term similarity, and sort them into Fit, Potential Fit and Not Fit"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen resumes against a job description
    Screen {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Paths to resume files (TXT, MD)
        #[arg(short, long, num_args = 1.., required = true)]
        resumes: Vec<PathBuf>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Show per-metric scores and missing competencies
        #[arg(short, long)]
        detailed: bool,

        /// Label candidates with the name found in the resume instead of the file name
        #[arg(long)]
        name_from_text: bool,
    },

    /// List the competencies found in a document
    Skills {
        /// Path to a resume or job description (TXT, MD)
        file: PathBuf,
    },

    /// Screen the bundled sample resumes against the sample job description
    Demo {
        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Show per-metric scores and missing competencies
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("console"), Ok(OutputFormat::Console));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("job.MD"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.pdf"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("README"), &["txt"]).is_err());
    }

    #[test]
    fn test_screen_args() {
        let cli = Cli::parse_from([
            "resume-screener",
            "screen",
            "--job",
            "job.txt",
            "--resumes",
            "a.txt",
            "b.md",
            "--detailed",
        ]);
        match cli.command {
            Commands::Screen { job, resumes, detailed, output, name_from_text } => {
                assert_eq!(job, PathBuf::from("job.txt"));
                assert_eq!(resumes.len(), 2);
                assert!(detailed);
                assert!(output.is_none());
                assert!(!name_from_text);
            }
            _ => panic!("expected screen command"),
        }
    }
}
