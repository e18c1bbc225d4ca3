//! Content extraction
//!
//! Turns the bytes of a supported document into plain text plus a small piece of
//! format-specific metadata. [`dispatch`] reads a file and routes it by extension:
//! - `.xlsx`, `.xls` - every sheet, tab-separated rows ([`spreadsheet`])
//! - `.pdf` - full-document text in page order ([`pdf`])
//! - `.json` - pretty-printed with 2-space indentation ([`structured`])
//! - `.csv`, `.txt` - passed through as UTF-8 ([`text`])

pub mod pdf;
pub mod spreadsheet;
pub mod structured;
pub mod text;

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::types::{AppError, AppResult};

/// Extensions accepted by the locator and the dispatcher, lowercase with leading dot.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = [".pdf", ".xlsx", ".xls", ".csv", ".json", ".txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Xlsx,
    Xls,
    Csv,
    Json,
    Text,
}

impl FileKind {
    /// Match a lowercase, dot-prefixed extension such as `.xlsx`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".pdf" => Some(FileKind::Pdf),
            ".xlsx" => Some(FileKind::Xlsx),
            ".xls" => Some(FileKind::Xls),
            ".csv" => Some(FileKind::Csv),
            ".json" => Some(FileKind::Json),
            ".txt" => Some(FileKind::Text),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(&extension_of(path))
    }

    /// Parsers for these formats are CPU bound and run off the async workers.
    fn is_blocking(self) -> bool {
        matches!(self, FileKind::Pdf | FileKind::Xlsx | FileKind::Xls)
    }
}

/// Lowercased extension with a leading dot, or an empty string when there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatMetadata {
    SheetCount(usize),
    RowCount(usize),
    PageCount(usize),
    LineCount(usize),
    /// Parsed JSON document, kept for structural inspection
    Data(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContent {
    pub text_content: String,
    pub metadata: FormatMetadata,
}

/// Convert raw bytes of a known kind into text.
pub fn extract_bytes(kind: FileKind, bytes: &[u8]) -> AppResult<ExtractedContent> {
    match kind {
        FileKind::Xlsx | FileKind::Xls => spreadsheet::extract(bytes),
        FileKind::Csv => Ok(text::extract_delimited(bytes)),
        FileKind::Pdf => pdf::extract(bytes),
        FileKind::Json => structured::extract(bytes),
        FileKind::Text => Ok(text::extract_plain(bytes)),
    }
}

/// Read a whole file and extract its content according to its extension.
pub async fn dispatch(path: &Path) -> AppResult<ExtractedContent> {
    let ext = extension_of(path);
    let kind = FileKind::from_extension(&ext).ok_or_else(|| {
        AppError::UnsupportedType(if ext.is_empty() { path.display().to_string() } else { ext.clone() })
    })?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::read(path, e))?;

    debug!(path = %path.display(), bytes = bytes.len(), ?kind, "Read file for extraction");

    let content = if kind.is_blocking() {
        tokio::task::spawn_blocking(move || extract_bytes(kind, &bytes)).await??
    } else {
        extract_bytes(kind, &bytes)?
    };

    info!(
        path = %path.display(),
        chars = content.text_content.chars().count(),
        "Extracted file content"
    );

    Ok(content)
}
