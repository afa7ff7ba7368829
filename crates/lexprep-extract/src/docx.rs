//! DOCX text extractor.
//!
//! Reads `word/document.xml` from the package and joins the text of the
//! body's top-level paragraphs with newlines. Tables, text boxes, content
//! controls, headers and footers are not part of the output.

use async_trait::async_trait;
use lexprep_core::{DocumentExtractor, DocumentFormat, ExtractError, ExtractedText};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extractor for DOCX files.
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new DOCX extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError> {
        debug!("Extracting DOCX: {:?}", path);

        let bytes = tokio::fs::read(path).await?;

        let paragraphs = tokio::task::spawn_blocking(move || docx_paragraphs(&bytes))
            .await
            .map_err(|e| ExtractError::Failed(format!("Task join error: {e}")))??;

        debug!("Extracted {} paragraphs from {:?}", paragraphs.len(), path);

        let paragraph_count = u32::try_from(paragraphs.len()).ok();
        let mut extracted = ExtractedText::new(paragraphs.join("\n"), DocumentFormat::Docx);
        extracted.metadata.paragraph_count = paragraph_count;
        Ok(extracted)
    }
}

/// Read the body paragraphs of a DOCX package held in memory.
pub(crate) fn docx_paragraphs(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Parse(format!("not a DOCX package: {e}")))?;

    let mut xml = String::new();
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Parse(format!("missing {DOCUMENT_PART}: {e}")))?;
    part.read_to_string(&mut xml)?;

    body_paragraphs(&xml)
}

/// Walk `document.xml` and collect the text of each top-level paragraph.
fn body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    // Depth inside elements whose paragraphs are not body paragraphs.
    let mut nested = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" | b"w:sdt" => nested += 1,
                b"w:p" if nested == 0 => current = Some(String::new()),
                b"w:r" => run_depth += 1,
                b"w:t" => in_text = nested == 0 && run_depth > 0,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if nested == 0 {
                    if e.name().as_ref() == b"w:p" {
                        paragraphs.push(String::new());
                    } else if run_depth > 0 {
                        if let Some(paragraph) = current.as_mut() {
                            push_run_element(paragraph, &e);
                        }
                    }
                }
            }
            Ok(Event::Text(e)) if in_text => {
                if let Some(paragraph) = current.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| ExtractError::Parse(format!("invalid text in {DOCUMENT_PART}: {e}")))?;
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" | b"w:sdt" => nested = nested.saturating_sub(1),
                b"w:p" if nested == 0 => {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::Parse(format!(
                    "invalid {DOCUMENT_PART} at position {}: {e}",
                    reader.error_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Append the text equivalent of an empty run child.
fn push_run_element(paragraph: &mut String, e: &BytesStart<'_>) {
    match e.name().as_ref() {
        b"w:tab" | b"w:ptab" => paragraph.push('\t'),
        b"w:cr" => paragraph.push('\n'),
        b"w:noBreakHyphen" => paragraph.push('-'),
        b"w:br" => {
            // Page and column breaks carry no text.
            let break_type = e.try_get_attribute("w:type").ok().flatten();
            let is_line_break = break_type
                .map_or(true, |attr| attr.value.as_ref() == b"textWrapping");
            if is_line_break {
                paragraph.push('\n');
            }
        }
        _ => {}
    }
}
