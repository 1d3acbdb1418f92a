//! cvforge — parse a CV document and print the structured record.
//!
//! Pipeline flow: extract text → segment → consolidate → split experience →
//! concurrent LLM extraction. Unsegmented documents go through the chunked
//! whole-document path instead.
//!
//! Doubles as the configuration smoke test: a missing API key fails here
//! with a clear message before any document work starts.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use cvforge_core::config::{load_dotenv, Config};
use cvforge_extract::extract_document;
use cvforge_llm::CvExtractor;
use cvforge_parse::{chunk_text, consolidate, segment_document, split_experience, TextKind};

/// Extract structured CV data from a .docx, .pdf, .txt or .html document.
#[derive(Parser, Debug)]
#[command(name = "cvforge", version, about)]
struct Cli {
    /// Document to process.
    file: PathBuf,

    /// Override the configured LLM provider ("openai", "anthropic", "ollama").
    #[arg(long, env = "LLM_PROVIDER")]
    provider: Option<String>,

    /// Override the configured model for the selected provider.
    #[arg(long)]
    model: Option<String>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Cli::parse();

    load_dotenv();
    let mut config = Config::from_env();
    if let Some(provider) = args.provider {
        config.llm.provider = provider;
    }
    if let Some(model) = args.model {
        match config.llm.provider.as_str() {
            "openai" => config.llm.openai_model = model,
            "anthropic" | "claude" => config.llm.anthropic_model = model,
            "ollama" => config.ollama.model = model,
            other => bail!("cannot set model for unknown provider '{other}'"),
        }
    }
    config.log_summary();

    // Credential problems surface here, before any document work.
    let extractor = CvExtractor::from_config(&config).context("failed to create LLM client")?;

    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .context("file path has no usable filename")?
        .to_string();
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let doc = extract_document(&bytes, &filename).context("document unreadable")?;
    info!(file_type = %doc.file_type, chars = doc.content.as_str().len(), "document extracted");

    let kind = if doc.content.is_html() { TextKind::Html } else { TextKind::Plain };
    let outcome = segment_document(doc.content.as_str(), kind);

    let report = if outcome.is_unsegmented() {
        info!("no section structure found, using chunked whole-document extraction");
        let text = outcome
            .sections
            .get(cvforge_parse::segment::UNSEGMENTED_KEY)
            .map(String::as_str)
            .unwrap_or_else(|| doc.content.as_str());
        let chunks = chunk_text(text, config.pipeline.chunk_token_budget);
        extractor.extract_chunks(&chunks).await
    } else {
        let consolidated = consolidate(&outcome.sections);
        let entries = split_experience(&consolidated.experience);
        extractor.extract(&consolidated, &entries).await
    };

    if !report.complete {
        tracing::warn!(failed = ?report.failed_fields, "extraction finished incomplete");
    }

    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{json}");

    Ok(())
}
