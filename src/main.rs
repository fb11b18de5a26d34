//! Resume screener: rank resumes against a job description

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::input::InputManager;
use resume_screener::output::{ReportGenerator, ScreeningReport};
use resume_screener::processing::profile::{ProfileExtractor, UNKNOWN_CANDIDATE};
use resume_screener::processing::skill_extractor::SkillExtractor;
use resume_screener::processing::{FittedMatcher, Matcher, ScreeningBatch, Vocabulary};
use resume_screener::sample;
use resume_screener::ScreenerError;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Could not load config from {}", path.display()))?,
        None => Config::load()?,
    };
    Ok(config)
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Screen {
            job,
            resumes,
            output,
            detailed,
            name_from_text,
        } => {
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;
            let format = resolve_format(output.as_deref(), &config)?;

            let mut input_manager = InputManager::new();
            let job_text = input_manager
                .extract_text(&job)
                .await
                .with_context(|| format!("Could not read job description {}", job.display()))?;

            let matcher = Matcher::from_config(&config)?.fit(&job_text)?;

            info!("Loading {} resumes", resumes.len());
            let progress = (resumes.len() > 1).then(|| loading_bar(resumes.len() as u64));
            let loaded = input_manager.collect(&resumes, progress.as_ref()).await;
            if let Some(pb) = &progress {
                pb.finish_and_clear();
            }

            let profiles = ProfileExtractor::new();
            let inputs = loaded.into_iter().map(|(path, text)| {
                let identifier = match &text {
                    Ok(text) if name_from_text => candidate_name(&profiles, text, &path),
                    _ => path.display().to_string(),
                };
                (identifier, text)
            });

            let batch = matcher.screen(inputs);
            print_report(
                &matcher,
                job.display().to_string(),
                batch,
                &config,
                format,
                detailed,
            )?;
        }

        Commands::Skills { file } => {
            let text = InputManager::new()
                .extract_text(&file)
                .await
                .with_context(|| format!("Could not read {}", file.display()))?;

            let extractor = SkillExtractor::new(Vocabulary::from_config(&config.vocabulary)?)?;
            let extraction = extractor.extract_detailed(&text);

            println!("Competencies in {} (found by {})", file.display(), extraction.tier);
            if extraction.skills.is_empty() {
                println!("  none");
            }
            for (category, skills) in extractor.group_by_category(&extraction.skills) {
                println!("  {}: {}", category, skills.join(", "));
            }
        }

        Commands::Demo { output, detailed } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let matcher = Matcher::from_config(&config)?.fit(sample::SAMPLE_JOB_DESCRIPTION)?;
            let records = matcher.match_many(&sample::sample_resumes())?;
            let batch = ScreeningBatch {
                records,
                failures: Vec::new(),
            };
            print_report(&matcher, "sample".to_string(), batch, &config, format, detailed)?;
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config)
                        .context("Could not serialize configuration")?;
                    println!("# {}\n{}", path.display(), content);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn resolve_format(output: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match output {
        Some(output) => Ok(cli::parse_output_format(output).map_err(ScreenerError::InvalidInput)?),
        None => Ok(config.output.format),
    }
}

fn print_report(
    matcher: &FittedMatcher,
    job_source: String,
    batch: ScreeningBatch,
    config: &Config,
    format: OutputFormat,
    detailed: bool,
) -> Result<()> {
    let report = ScreeningReport::new(
        job_source,
        matcher.reference().competencies.clone(),
        batch,
        *matcher.scorer().config(),
    );
    let generator = ReportGenerator::new(config.output.color_output, detailed || config.output.detailed);
    println!("{}", generator.generate_report(&report, format)?);
    Ok(())
}

fn loading_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{bar:30} {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

/// Name found in the resume, falling back to the file stem
fn candidate_name(profiles: &ProfileExtractor, text: &str, path: &Path) -> String {
    let name = profiles.extract_name(text);
    if name == UNKNOWN_CANDIDATE {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    } else {
        name
    }
}
