use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::text::normalize_string;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
}

pub type ReaderResult<T> = Result<T, ReaderError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    PlainText,
    Pdf,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" | "text" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Extracts the text layer of a PDF file.
pub fn pdf_to_text(path: &Path) -> ReaderResult<String> {
    let bytes = std::fs::read(path)?;
    pdf_bytes_to_text(&bytes)
}

pub fn pdf_bytes_to_text(bytes: &[u8]) -> ReaderResult<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ReaderError::Pdf(e.to_string()))
}

/// Reads a resume file as raw text, dispatching on its extension.
pub fn read_document(path: &Path) -> ReaderResult<String> {
    match DocumentFormat::from_path(path) {
        Some(DocumentFormat::Pdf) => pdf_to_text(path),
        Some(DocumentFormat::PlainText) => Ok(std::fs::read_to_string(path)?),
        None => Err(ReaderError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Splits raw document text into normalized lines longer than `min_len`.
#[must_use]
pub fn document_lines(text: &str, min_len: usize) -> Vec<String> {
    let text = text.replace('\r', "\n").replace('\t', " ");

    let lines: Vec<String> = text
        .split('\n')
        .map(normalize_string)
        .filter(|line| line.len() > min_len)
        .collect();

    tracing::info!("Extracted {} lines from document", lines.len());
    lines
}
