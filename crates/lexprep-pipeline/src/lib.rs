//! Batch preprocessing of contract directories.
//!
//! Walks an input tree, routes every PDF and DOCX through the extractor and
//! cleaner, and writes `<stem>.txt` and `<stem>_cleaned.txt` into two output
//! directories.
//!
//! # Components
//!
//! - [`BatchPipeline`]: Runs one batch and returns a [`BatchReport`](lexprep_core::BatchReport)
//! - [`collect_files`]: Recursive source discovery
//! - [`LogObserver`]: Progress through `tracing`
//! - [`RecordingObserver`]: Keeps events in memory
//!
//! # Example
//!
//! ```rust,ignore
//! use lexprep_extract::ExtractionRouter;
//! use lexprep_pipeline::BatchPipeline;
//! use std::sync::Arc;
//!
//! let pipeline = BatchPipeline::new(Arc::new(ExtractionRouter::default()));
//! let report = pipeline
//!     .run(
//!         Path::new("data/raw/contracts"),
//!         Path::new("data/processed/extracted_text"),
//!         Path::new("data/processed/cleaned_text"),
//!     )
//!     .await?;
//! println!("{} written, {} failed", report.written.len(), report.failed());
//! ```

pub mod discover;
pub mod observer;
pub mod output;
pub mod pipeline;

pub use discover::collect_files;
pub use observer::{LogObserver, RecordingObserver};
pub use output::write_pair_atomic;
pub use pipeline::BatchPipeline;
