//! # lexprep-extract
//!
//! Text extraction for the lexprep pipeline.
//!
//! ## Supported Formats
//!
//! | Extractor | Formats | Output |
//! |-----------|---------|--------|
//! | [`PdfExtractor`] | `.pdf` | Text of every page in order, page count |
//! | [`DocxExtractor`] | `.docx` | Body paragraphs joined with `\n`, paragraph count |
//!
//! Extensions are matched case-insensitively. Anything else is rejected with
//! [`ExtractError::UnsupportedFormat`](lexprep_core::ExtractError::UnsupportedFormat).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lexprep_clean::TextCleaner;
//! use lexprep_extract::ExtractionRouter;
//! use std::path::Path;
//!
//! let router = ExtractionRouter::with_defaults(TextCleaner::new());
//! let routed = router.route(Path::new("contracts/Lease Agreement.pdf")).await?;
//! println!("{} raw chars, {} cleaned", routed.raw_text.len(), routed.cleaned_text.len());
//! ```

pub mod docx;
pub mod pdf;
pub mod router;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use router::ExtractionRouter;
