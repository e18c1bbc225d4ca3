// PDF text extraction via lopdf

use lopdf::Document;
use tracing::{debug, warn};

use super::{ExtractedContent, FormatMetadata};
use crate::types::{AppError, AppResult};

pub fn extract(bytes: &[u8]) -> AppResult<ExtractedContent> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("Failed to load PDF: {}", e)))?;

    // get_pages is keyed by page number, so iteration follows document order
    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let page_count = page_numbers.len();

    let text_content = if page_numbers.is_empty() {
        String::new()
    } else {
        doc.extract_text(&page_numbers)
            .map_err(|e| AppError::Extraction(format!("PDF text extraction failed: {}", e)))?
    };

    if text_content.trim().is_empty() {
        warn!(pages = page_count, "PDF has no extractable text, likely scanned");
    }
    debug!(pages = page_count, chars = text_content.len(), "Extracted PDF text");

    Ok(ExtractedContent {
        text_content,
        metadata: FormatMetadata::PageCount(page_count),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a PDF with one page per entry, each showing its text in Courier.
    pub(crate) fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_pages_in_document_order() {
        let bytes = build_pdf(&["Quarterly revenue", "Closing remarks"]);
        let content = extract(&bytes).unwrap();

        assert_eq!(content.metadata, FormatMetadata::PageCount(2));
        let first = content.text_content.find("Quarterly").unwrap();
        let second = content.text_content.find("Closing").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_malformed_pdf_fails() {
        let err = extract(b"%PDF-1.5 truncated garbage").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
