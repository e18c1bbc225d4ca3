// Plain and delimited text pass-through

use super::{ExtractedContent, FormatMetadata};

/// Delimited text is not parsed; the raw text is forwarded as-is.
pub fn extract_delimited(bytes: &[u8]) -> ExtractedContent {
    let text_content = String::from_utf8_lossy(bytes).into_owned();
    let rows = text_content.split('\n').filter(|l| !l.trim().is_empty()).count();

    ExtractedContent {
        text_content,
        metadata: FormatMetadata::RowCount(rows),
    }
}

pub fn extract_plain(bytes: &[u8]) -> ExtractedContent {
    let text_content = String::from_utf8_lossy(bytes).into_owned();
    let lines = text_content.split('\n').count();

    ExtractedContent {
        text_content,
        metadata: FormatMetadata::LineCount(lines),
    }
}
