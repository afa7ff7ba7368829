//! # lexprep-core
//!
//! Core types and traits for lexprep, a preprocessing tool that turns
//! directories of PDF and DOCX contracts into raw and cleaned text files.
//!
//! ## Architecture
//!
//! ```text
//! SourceFile → DocumentFormat → DocumentExtractor → clean → OutputPair
//!                                                              ↓
//!                                                  BatchObserver / BatchReport
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DocumentFormat`] | Closed set of extractable formats |
//! | [`ExtractedText`] | Extractor output with metadata |
//! | [`RoutedText`] | Raw and cleaned text of one file |
//! | [`OutputPair`] | Paths of the two artifacts written per file |
//! | [`BatchReport`] | Summary of a batch run |
//!
//! ## Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`DocumentExtractor`] | Extract text from one document format |
//! | [`BatchObserver`] | Receive progress events from a batch run |
//!
//! ## Related Crates
//!
//! - `lexprep-clean`: Text normalization
//! - `lexprep-extract`: PDF/DOCX extractors and the extraction router
//! - `lexprep-pipeline`: Directory batch pipeline
//! - `lexprep-cuad`: CUAD annotation reader

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, ExtractError, Result};
pub use traits::*;
pub use types::*;
