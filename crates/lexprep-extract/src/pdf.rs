//! PDF text extractor.
//!
//! Uses pdf-extract for the text layer and lopdf for the page count.

use async_trait::async_trait;
use lexprep_core::{DocumentExtractor, DocumentFormat, ExtractError, ExtractedText};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// Extractor for PDF files.
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError> {
        debug!("Extracting PDF: {:?}", path);

        let bytes = tokio::fs::read(path).await?;

        // Both parsers are blocking and pdf-extract may panic on malformed input;
        // a panic surfaces here as a join error.
        let (text, page_count) = tokio::task::spawn_blocking(move || {
            let text = extract_pdf_text(&bytes)?;
            Ok::<_, String>((text, count_pages(&bytes)))
        })
        .await
        .map_err(|e| ExtractError::Failed(format!("Task join error: {e}")))?
        .map_err(|e| ExtractError::Failed(format!("PDF extraction failed: {e}")))?;

        debug!(
            "Extracted {} chars from {:?} ({:?} pages)",
            text.len(),
            path,
            page_count
        );

        let mut extracted = ExtractedText::new(text, DocumentFormat::Pdf);
        extracted.metadata.page_count = page_count;
        Ok(extracted)
    }
}

/// Extract the text of every page, in document order.
fn extract_pdf_text(bytes: &[u8]) -> Result<String, String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
}

/// Count pages with lopdf. `None` if the document cannot be loaded.
fn count_pages(bytes: &[u8]) -> Option<u32> {
    match Document::load_mem(bytes) {
        Ok(doc) => u32::try_from(doc.get_pages().len()).ok(),
        Err(e) => {
            debug!("Failed to load PDF for page count: {}", e);
            None
        }
    }
}
