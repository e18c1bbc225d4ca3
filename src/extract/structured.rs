// JSON documents, re-serialized in a canonical pretty form

use super::{ExtractedContent, FormatMetadata};
use crate::types::{AppError, AppResult};

pub fn extract(bytes: &[u8]) -> AppResult<ExtractedContent> {
    let text = String::from_utf8_lossy(bytes);
    let data: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| AppError::Extraction(format!("Invalid JSON: {}", e)))?;

    // serde_json's pretty printer indents with two spaces
    let text_content = serde_json::to_string_pretty(&data)
        .map_err(|e| AppError::Extraction(format!("Failed to serialize JSON: {}", e)))?;

    Ok(ExtractedContent {
        text_content,
        metadata: FormatMetadata::Data(data),
    })
}
