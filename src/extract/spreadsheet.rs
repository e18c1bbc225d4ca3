// Excel workbooks (.xlsx and legacy .xls) via calamine

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::debug;

use super::{ExtractedContent, FormatMetadata};
use crate::types::{AppError, AppResult};

/// Render every sheet in workbook order as `--- name ---` followed by tab-joined rows.
pub fn extract(bytes: &[u8]) -> AppResult<ExtractedContent> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| AppError::Extraction(format!("Failed to open workbook: {}", e)))?;

    let sheet_names = workbook.sheet_names();
    let mut text_content = String::new();

    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| AppError::Extraction(format!("Failed to read sheet {}: {}", sheet_name, e)))?;

        text_content.push_str(&format!("\n--- {} ---\n", sheet_name));
        let rows: Vec<String> = range
            .rows()
            .map(|row| {
                // Ranges are rectangular; drop the padding after a row's last value.
                let width = row
                    .iter()
                    .rposition(|cell| !matches!(cell, Data::Empty))
                    .map_or(0, |last| last + 1);
                row[..width]
                    .iter()
                    .map(|cell| cell.to_string())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect();
        text_content.push_str(&rows.join("\n"));

        debug!(sheet = %sheet_name, rows = rows.len(), "Rendered sheet");
    }

    Ok(ExtractedContent {
        text_content,
        metadata: FormatMetadata::SheetCount(sheet_names.len()),
    })
}
