//! Command-line entry point.
//!
//! Two subcommands cover the two deliverables: `summarize` renders the
//! assembled case summary, `demand` adds the settlement calculation and
//! drafts the demand letter. Reports print to stdout unless `--output`
//! names a file; logs always go to stderr so piped output stays clean.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use casebrief::config::{self, FirmConfig};
use casebrief::pipeline::{self, DemandCalculator};
use casebrief::report;
use casebrief::source::load_corpus;

#[derive(Parser)]
#[command(
    name = "casebrief",
    version = config::APP_VERSION,
    about = "Summarize extracted personal injury case documents and draft settlement demands."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a document corpus and render the case summary
    Summarize {
        /// Directory holding the extracted case documents
        corpus: PathBuf,

        /// Write the report to this file instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = SummaryFormat::Json)]
        format: SummaryFormat,
    },
    /// Calculate a settlement demand and draft the demand letter
    Demand {
        /// Directory holding the extracted case documents
        corpus: PathBuf,

        /// Firm profile JSON for the letterhead and signature block
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write the letter to this file instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Letter format (`json` emits the raw demand calculation)
        #[arg(long, value_enum, default_value_t = DemandFormat::Markdown)]
        format: DemandFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SummaryFormat {
    Json,
    Markdown,
    Html,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DemandFormat {
    Markdown,
    Html,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    match cli.command {
        Commands::Summarize {
            corpus,
            output,
            format,
        } => summarize(&corpus, output.as_deref(), format),
        Commands::Demand {
            corpus,
            config,
            output,
            format,
        } => demand(&corpus, config.as_deref(), output.as_deref(), format),
    }
}

fn summarize(corpus: &Path, output: Option<&Path>, format: SummaryFormat) -> Result<()> {
    let loaded = load_corpus(corpus)?;
    tracing::info!(
        case_id = %loaded.case_id,
        documents = loaded.documents.len(),
        "Corpus loaded"
    );

    let summary = pipeline::run(&loaded.case_id, &loaded.documents, None);
    let rendered = match format {
        SummaryFormat::Json => report::summary_json(&summary)?,
        SummaryFormat::Markdown => report::summary_markdown(&summary),
        SummaryFormat::Html => report::summary_html(&summary),
    };
    emit(&rendered, output)
}

fn demand(
    corpus: &Path,
    firm_profile: Option<&Path>,
    output: Option<&Path>,
    format: DemandFormat,
) -> Result<()> {
    let firm = match firm_profile {
        Some(path) => FirmConfig::load(path)?,
        None => FirmConfig::default(),
    };

    let loaded = load_corpus(corpus)?;
    tracing::info!(
        case_id = %loaded.case_id,
        documents = loaded.documents.len(),
        "Corpus loaded"
    );

    let calculator = DemandCalculator::default();
    let summary = pipeline::run(&loaded.case_id, &loaded.documents, Some(&calculator));
    let calculation = summary
        .demand
        .as_ref()
        .context("Pipeline produced no demand calculation")?;

    let rendered = match format {
        DemandFormat::Markdown => report::demand_letter_markdown(&summary, calculation, &firm),
        DemandFormat::Html => report::demand_letter_html(&summary, calculation, &firm),
        DemandFormat::Json => serde_json::to_string_pretty(calculation)?,
    };
    emit(&rendered, output)
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Could not write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
