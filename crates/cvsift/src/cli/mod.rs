pub mod dates;
pub mod parse;
pub mod segment;
pub mod serve;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cvsift_core::{HttpClassifier, HttpEntityTagger, ResumeParser, SegmentName, Settings};

#[derive(Parser)]
#[command(
    name = "cvsift",
    about = "Resume segmentation and structured field extraction",
    version
)]
pub struct Cli {
    /// Settings file (JSON); defaults to the user config directory
    #[arg(long, global = true, env = "CVSIFT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a resume (PDF or plain text) and print the JSON result
    Parse {
        /// Resume file
        file: PathBuf,
        #[command(flatten)]
        endpoints: Endpoints,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Split a resume into its sections
    Segment {
        /// Resume file
        file: PathBuf,
    },
    /// List the date intervals found in a resume
    Dates {
        /// Resume file
        file: PathBuf,
        /// Only keep intervals belonging to this section
        #[arg(long)]
        segment: Option<SegmentName>,
    },
    /// Serve the parser over HTTP
    Serve {
        #[command(flatten)]
        endpoints: Endpoints,
        /// Port to listen on
        #[arg(short, long, env = "CVSIFT_PORT")]
        port: Option<u16>,
    },
}

/// Inference endpoints, overriding the settings file.
#[derive(Args)]
pub struct Endpoints {
    /// Zero-shot classification endpoint
    #[arg(long, env = "CVSIFT_CLASSIFIER_URL")]
    pub classifier_url: Option<String>,
    /// Named-entity tagging endpoint
    #[arg(long, env = "CVSIFT_TAGGER_URL")]
    pub tagger_url: Option<String>,
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    Settings::load(path).with_context(|| match path {
        Some(path) => format!("Failed to load settings from {}", path.display()),
        None => "Failed to load settings".to_string(),
    })
}

/// Builds a parser backed by the HTTP inference endpoints. Must run outside
/// an async runtime: the clients are blocking.
pub fn build_parser(settings: &Settings, endpoints: &Endpoints) -> Result<ResumeParser> {
    let classifier_url = endpoints
        .classifier_url
        .as_deref()
        .or(settings.classifier_url.as_deref())
        .context("No classifier endpoint configured; pass --classifier-url or set CVSIFT_CLASSIFIER_URL")?;
    let tagger_url = endpoints
        .tagger_url
        .as_deref()
        .or(settings.tagger_url.as_deref())
        .context("No tagger endpoint configured; pass --tagger-url or set CVSIFT_TAGGER_URL")?;

    let classifier = HttpClassifier::new(classifier_url)?;
    let tagger = HttpEntityTagger::new(tagger_url)?;
    tracing::debug!(classifier_url, tagger_url, "Using inference endpoints");

    Ok(ResumeParser::new(Box::new(classifier), Box::new(tagger))
        .with_headers(settings.headers.clone())
        .with_config(settings.parser.clone())
        .with_resources(settings.resources()))
}

/// Reads a resume file into normalized lines.
pub fn read_lines(path: &Path, settings: &Settings) -> Result<Vec<String>> {
    let text = cvsift_core::reader::read_document(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(cvsift_core::reader::document_lines(
        &text,
        settings.parser.min_line_length,
    ))
}
