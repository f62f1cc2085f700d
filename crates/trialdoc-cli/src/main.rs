//! Clinical trial document extraction CLI.
//!
//! Runs the OCR-extract-normalize pipeline against a PDF and prints (or
//! saves) the outcome as JSON. This binary is the "calling layer": it
//! enforces the 50 MB ceiling and the PDF media type, resolves credentials
//! from the environment, and injects them into the library as explicit
//! configuration.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use trialdoc_core::{DocumentKind, ExtractionOutcome, ProviderConfig, RawDocument};
use trialdoc_extract::{schema_for, FallbackClient};
use trialdoc_pipeline::ExtractionPipeline;

/// Document kind selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Study protocol
    Protocol,
    /// Study budget
    Budget,
    /// Clinical trial agreement
    Cta,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Protocol => Self::Protocol,
            KindArg::Budget => Self::Budget,
            KindArg::Cta => Self::Cta,
        }
    }
}

#[derive(Parser)]
#[command(name = "trialdoc")]
#[command(about = "Extract structured data from clinical trial documents")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract structured fields from a PDF
    Extract {
        /// Path to the PDF file
        #[arg(short, long)]
        pdf: PathBuf,

        /// Document kind to extract
        #[arg(short, long, value_enum)]
        kind: KindArg,

        /// Write the outcome JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the chat model
        #[arg(long)]
        model: Option<String>,

        /// Retry through the fallback provider when the primary extraction
        /// fails or returns placeholder values (requires OPENAI_API_KEY)
        #[arg(long)]
        fallback: bool,
    },

    /// Run OCR only and return the raw page text
    Ocr {
        /// Path to the PDF file
        #[arg(short, long)]
        pdf: PathBuf,

        /// Write the outcome JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the extraction schema for a document kind
    Schema {
        /// Document kind
        #[arg(short, long, value_enum)]
        kind: KindArg,
    },
}

/// Outcome wrapper written to stdout or the output file.
#[derive(Debug, Serialize)]
struct ExtractionReport<T> {
    document: String,
    kind: String,
    extracted_at: DateTime<Utc>,
    #[serde(flatten)]
    outcome: ExtractionOutcome<T>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "trialdoc=info"
                    .parse()
                    .expect("directive is compile-time constant"),
            ),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Extract {
            pdf,
            kind,
            output,
            model,
            fallback,
        } => {
            let document = load_document(&pdf)?;
            let config = primary_config(model)?;
            let fallback = if fallback {
                Some(FallbackClient::new(std::env::var("OPENAI_API_KEY").context(
                    "OPENAI_API_KEY not set; required for --fallback",
                )?))
            } else {
                None
            };

            match DocumentKind::from(kind) {
                DocumentKind::Protocol => {
                    let pipeline = ExtractionPipeline::protocol(&config);
                    run_extract(&pipeline, fallback.as_ref(), &document, &pdf, output.as_deref())
                        .await?;
                }
                DocumentKind::Budget => {
                    let pipeline = ExtractionPipeline::budget(&config);
                    run_extract(&pipeline, fallback.as_ref(), &document, &pdf, output.as_deref())
                        .await?;
                }
                DocumentKind::Cta => {
                    let pipeline = ExtractionPipeline::cta(&config);
                    run_extract(&pipeline, fallback.as_ref(), &document, &pdf, output.as_deref())
                        .await?;
                }
            }
        }
        Command::Ocr { pdf, output } => {
            let document = load_document(&pdf)?;
            let config = primary_config(None)?;
            // OCR mode has no record type; the protocol pipeline's parameter
            // only shapes the unused chat stage.
            let pipeline = ExtractionPipeline::protocol(&config);
            let outcome = pipeline.ocr_only(&document.bytes).await;
            let report = ExtractionReport {
                document: display_name(&pdf),
                kind: "ocr".to_string(),
                extracted_at: Utc::now(),
                outcome,
            };
            emit(&report, output.as_deref())?;
        }
        Command::Schema { kind } => {
            let schema = schema_for(kind.into());
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

/// Read the PDF and run the admission checks the pipeline itself does not
/// repeat: media type, magic bytes, and the 50 MB ceiling.
fn load_document(path: &Path) -> Result<RawDocument> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let document = RawDocument::new(bytes);
    document.validate()?;
    Ok(document)
}

/// Primary provider configuration from the environment.
fn primary_config(model: Option<String>) -> Result<ProviderConfig> {
    let api_key = std::env::var("MISTRAL_API_KEY").context("MISTRAL_API_KEY not set")?;
    let mut config = ProviderConfig::new(api_key);
    if let Some(model) = model {
        config = config.with_model(model);
    }
    Ok(config)
}

async fn run_extract<R: Serialize>(
    pipeline: &ExtractionPipeline<R>,
    fallback: Option<&FallbackClient>,
    document: &RawDocument,
    pdf: &Path,
    output: Option<&Path>,
) -> Result<()> {
    info!(kind = %pipeline.kind(), document = %display_name(pdf), "starting extraction");

    let outcome = match fallback {
        Some(client) => pipeline.extract_with_fallback(client, &document.bytes).await,
        None => pipeline.extract(&document.bytes).await,
    };

    let report = ExtractionReport {
        document: display_name(pdf),
        kind: pipeline.kind().to_string(),
        extracted_at: Utc::now(),
        outcome,
    };
    emit(&report, output)
}

fn emit<T: Serialize>(report: &ExtractionReport<T>, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "saved extraction report");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}
