//! Core types for lexprep.
//!
//! ## Documents
//! - [`DocumentFormat`]: Closed set of formats the router understands
//! - [`ExtractedText`]: Text produced by an extractor, plus metadata
//! - [`RoutedText`]: Raw and cleaned text for one source file
//!
//! ## Outputs
//! - [`OutputPair`]: Where the raw and cleaned artifacts of one source were written
//! - [`output_stem`]: Naming rule shared by both artifacts
//!
//! ## Batch runs
//! - [`BatchEvent`]: Progress events emitted during a run
//! - [`BatchReport`]: Summary of a finished run
//! - [`FileFailure`]: One source file that could not be processed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ExtractError;

// ============================================================================
// Formats
// ============================================================================

/// Document formats with a text extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word processing document
    Docx,
}

impl DocumentFormat {
    /// Every supported format.
    pub const ALL: [DocumentFormat; 2] = [DocumentFormat::Pdf, DocumentFormat::Docx];

    /// Classify a bare extension (without the leading dot), ignoring case.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| ext.eq_ignore_ascii_case(format.extension()))
    }

    /// Classify a file by its extension.
    ///
    /// Fails with [`ExtractError::UnsupportedFormat`] naming the lower-cased
    /// extension (with its leading dot) when the format is not recognized.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase());
        match ext.as_deref() {
            Some(ext) => Self::from_extension(ext)
                .ok_or_else(|| ExtractError::UnsupportedFormat(format!(".{ext}"))),
            None => Err(ExtractError::UnsupportedFormat("(none)".to_string())),
        }
    }

    /// Canonical file extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// MIME type of the format.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => f.write_str("PDF"),
            Self::Docx => f.write_str("DOCX"),
        }
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Text extracted from one document.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// Extracted text, in document order
    pub text: String,
    /// Extraction metadata
    pub metadata: ExtractionMetadata,
}

impl ExtractedText {
    /// Wrap extracted text for the given format.
    #[must_use]
    pub fn new(text: String, format: DocumentFormat) -> Self {
        Self {
            text,
            metadata: ExtractionMetadata::for_format(format),
        }
    }

    /// True when the document yielded no visible text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_blank(&self.text)
    }
}

/// Metadata about an extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Source format
    pub format: DocumentFormat,
    /// Number of pages (PDF)
    pub page_count: Option<u32>,
    /// Number of body paragraphs (DOCX)
    pub paragraph_count: Option<u32>,
}

impl ExtractionMetadata {
    /// Empty metadata for a format.
    #[must_use]
    pub fn for_format(format: DocumentFormat) -> Self {
        Self {
            format,
            page_count: None,
            paragraph_count: None,
        }
    }
}

/// Raw and cleaned text for one source file.
#[derive(Debug, Clone)]
pub struct RoutedText {
    /// Text as produced by the extractor
    pub raw_text: String,
    /// Text after cleaning
    pub cleaned_text: String,
    /// Extraction metadata
    pub metadata: ExtractionMetadata,
}

impl RoutedText {
    /// Split extracted text into a routed result with its cleaned form.
    #[must_use]
    pub fn new(extracted: ExtractedText, cleaned_text: String) -> Self {
        Self {
            raw_text: extracted.text,
            cleaned_text,
            metadata: extracted.metadata,
        }
    }

    /// True when the extractor yielded no visible text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_blank(&self.raw_text)
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

// ============================================================================
// Outputs
// ============================================================================

/// Derive the output stem for a source file.
///
/// The stem is the file name without its final extension, with spaces
/// replaced by underscores, lower-cased.
#[must_use]
pub fn output_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace(' ', "_").to_lowercase())
        .unwrap_or_default()
}

/// The two artifacts written for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPair {
    /// Source document
    pub source: PathBuf,
    /// `<stem>.txt` in the raw output directory
    pub raw: PathBuf,
    /// `<stem>_cleaned.txt` in the cleaned output directory
    pub cleaned: PathBuf,
}

impl OutputPair {
    /// Compute the output locations for a source file.
    #[must_use]
    pub fn for_source(source: &Path, raw_dir: &Path, cleaned_dir: &Path) -> Self {
        let stem = output_stem(source);
        Self {
            source: source.to_path_buf(),
            raw: raw_dir.join(format!("{stem}.txt")),
            cleaned: cleaned_dir.join(format!("{stem}_cleaned.txt")),
        }
    }
}

// ============================================================================
// Batch runs
// ============================================================================

/// Events emitted while a batch runs.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// No file with a supported extension was found.
    NoInputFiles { root: PathBuf },
    /// Discovery finished and processing is about to start.
    BatchStarted { root: PathBuf, file_count: usize },
    /// A file is about to be processed.
    FileStarted { path: PathBuf },
    /// A file yielded no text; its (empty) outputs are still written.
    EmptyDocument { path: PathBuf },
    /// A file maps to a stem already written during this run.
    DuplicateStem { path: PathBuf, stem: String },
    /// Both artifacts of a file were written.
    FileWritten { pair: OutputPair },
    /// A file could not be processed.
    FileFailed { path: PathBuf, error: String },
    /// The run is over.
    BatchFinished { written: usize, failed: usize },
}

/// A source file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// Source document
    pub path: PathBuf,
    /// Error message
    pub error: String,
}

/// Summary of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Directory that was scanned
    pub input_root: PathBuf,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// Number of supported files found
    pub discovered: usize,
    /// Output pairs written
    pub written: Vec<OutputPair>,
    /// Files that failed
    pub failures: Vec<FileFailure>,
    /// Files that were written but had no text
    pub empty_documents: usize,
}

impl BatchReport {
    /// Start a report for a run over `input_root`.
    #[must_use]
    pub fn new(input_root: &Path) -> Self {
        let now = Utc::now();
        Self {
            input_root: input_root.to_path_buf(),
            started_at: now,
            finished_at: now,
            discovered: 0,
            written: Vec::new(),
            failures: Vec::new(),
            empty_documents: 0,
        }
    }

    /// Number of failed files.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True when no file failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
