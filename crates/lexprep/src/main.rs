//! # lexprep CLI
//!
//! Command-line interface for lexprep, which turns directories of PDF and
//! DOCX contracts into raw and cleaned UTF-8 text files.
//!
//! ## Commands
//!
//! - `lexprep run` - Process every contract under the input directory
//! - `lexprep extract <FILE>` - Extract and clean a single document
//! - `lexprep clean [FILE]` - Clean a text file or stdin
//! - `lexprep cuad <JSON>` - Show sample CUAD question/answer pairs
//! - `lexprep config show|init|path` - Inspect configuration
//!
//! ## Examples
//!
//! ```bash
//! # Process the default data/raw/contracts tree
//! lexprep run
//!
//! # Process another tree and fail on any broken file
//! lexprep run --input ~/contracts --strict
//!
//! # Get a JSON report
//! lexprep --format json run
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lexprep_clean::TextCleaner;
use lexprep_core::BatchReport;
use lexprep_cuad::{load_cuad, sample_entries};
use lexprep_extract::ExtractionRouter;
use lexprep_pipeline::BatchPipeline;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "lexprep")]
#[command(about = "Extract and clean text from PDF and DOCX contracts")]
#[command(version)]
struct Cli {
    /// Path to config file (default: ~/.config/lexprep/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and clean every PDF and DOCX under a directory
    Run {
        /// Directory to scan (default: paths.input)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory for raw text (default: paths.raw_output)
        #[arg(long)]
        raw_out: Option<PathBuf>,

        /// Directory for cleaned text (default: paths.cleaned_output)
        #[arg(long)]
        clean_out: Option<PathBuf>,

        /// Exit non-zero if any file fails
        #[arg(long)]
        strict: bool,
    },

    /// Extract a single document and print its text
    Extract {
        /// PDF or DOCX file
        file: PathBuf,

        /// Print the raw text instead of the cleaned text
        #[arg(long)]
        raw: bool,
    },

    /// Clean a text file, or stdin when no file is given
    Clean {
        /// Text file to clean
        file: Option<PathBuf>,
    },

    /// Show sample question/answer pairs from a CUAD JSON file
    Cuad {
        /// CUAD JSON file (SQuAD format)
        path: PathBuf,

        /// Number of samples
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print sample configuration file
    Init,
    /// Show config file path
    Path,
}

/// Output structure for single-file extraction.
#[derive(Serialize)]
struct ExtractOutput {
    file: String,
    format: String,
    mime_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paragraph_count: Option<u32>,
    raw_text: String,
    cleaned_text: String,
}

/// Output structure for CUAD samples.
#[derive(Serialize)]
struct CuadSample<'a> {
    question: &'a str,
    answer: &'a str,
    context: &'a str,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_from(cli.config.clone()).context("Failed to load config")?;

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.logging.max_level()?
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let router = Arc::new(ExtractionRouter::with_defaults(TextCleaner::with_options(
        config.cleaning,
    )));

    match cli.command {
        Commands::Run {
            input,
            raw_out,
            clean_out,
            strict,
        } => {
            let input = input.unwrap_or_else(|| config.paths.input.clone());
            let raw_out = raw_out.unwrap_or_else(|| config.paths.raw_output.clone());
            let clean_out = clean_out.unwrap_or_else(|| config.paths.cleaned_output.clone());

            info!("Preprocessing contracts in {:?}", input);

            let pipeline = BatchPipeline::new(router);
            let report = pipeline
                .run(&input, &raw_out, &clean_out)
                .await
                .context("Batch run failed")?;

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Text => print_report(&report),
            }

            if !report.is_success() && (strict || config.run.fail_on_error) {
                anyhow::bail!(
                    "{} of {} files failed",
                    report.failed(),
                    report.discovered
                );
            }
        }

        Commands::Extract { file, raw } => {
            let routed = router
                .route(&file)
                .await
                .with_context(|| format!("Failed to extract {}", file.display()))?;

            match cli.format {
                OutputFormat::Json => {
                    let output = ExtractOutput {
                        file: file.to_string_lossy().to_string(),
                        format: routed.metadata.format.to_string(),
                        mime_type: routed.metadata.format.mime_type(),
                        page_count: routed.metadata.page_count,
                        paragraph_count: routed.metadata.paragraph_count,
                        raw_text: routed.raw_text,
                        cleaned_text: routed.cleaned_text,
                    };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    if raw {
                        println!("{}", routed.raw_text);
                    } else {
                        println!("{}", routed.cleaned_text);
                    }
                }
            }
        }

        Commands::Clean { file } => {
            let text = match file {
                Some(path) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut text = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut text)
                        .await
                        .context("Failed to read stdin")?;
                    text
                }
            };

            let cleaned = router.cleaner().clean(&text);

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "cleaned_text": cleaned }));
                }
                OutputFormat::Text => println!("{cleaned}"),
            }
        }

        Commands::Cuad { path, count } => {
            let entries = load_cuad(&path)
                .with_context(|| format!("Failed to load CUAD file {}", path.display()))?;
            let samples = sample_entries(&entries, count);

            match cli.format {
                OutputFormat::Json => {
                    let output: Vec<CuadSample<'_>> = samples
                        .iter()
                        .map(|&(question, answer, context)| CuadSample {
                            question,
                            answer,
                            context,
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    println!("{} entries in {}\n", entries.len(), path.display());
                    for (question, answer, _context) in samples {
                        println!("Q: {question}");
                        println!("A: {}", if answer.is_empty() { "(none)" } else { answer });
                        println!("---");
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => match cli.format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&config)
                            .context("Failed to serialize config")?
                    );
                }
                OutputFormat::Text => {
                    println!(
                        "{}",
                        toml::to_string_pretty(&config).context("Failed to serialize config")?
                    );
                }
            },
            ConfigAction::Init => {
                println!("{}", Config::sample_toml());
            }
            ConfigAction::Path => {
                if let Some(path) = Config::config_path() {
                    println!("{}", path.display());
                } else {
                    println!("Could not determine config directory");
                }
            }
        },
    }

    Ok(())
}

/// Print a human-readable batch summary.
fn print_report(report: &BatchReport) {
    if report.discovered == 0 {
        println!(
            "No valid files found to process in {}",
            report.input_root.display()
        );
        return;
    }

    println!("Processed {} files from {}", report.discovered, report.input_root.display());
    println!("  Written: {}", report.written.len());
    if report.empty_documents > 0 {
        println!("  Empty:   {}", report.empty_documents);
    }
    println!("  Failed:  {}", report.failed());
    for failure in &report.failures {
        println!("    {}: {}", failure.path.display(), failure.error);
    }
}
