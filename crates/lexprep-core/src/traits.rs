//! Core traits for lexprep components.
//!
//! - [`DocumentExtractor`]: Extract text from one document format
//! - [`BatchObserver`]: Receive progress events from a batch run

use async_trait::async_trait;
use std::path::Path;

use crate::error::ExtractError;
use crate::types::{BatchEvent, DocumentFormat, ExtractedText};

// ============================================================================
// Extraction
// ============================================================================

/// Trait for extracting text from documents of a single format.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// The format this extractor handles.
    fn format(&self) -> DocumentFormat;

    /// Extract the document's text in document order.
    ///
    /// An empty document is `Ok` with empty text; parser failures are `Err`.
    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError>;
}

// ============================================================================
// Observation
// ============================================================================

/// Receives progress events from a single batch run.
pub trait BatchObserver: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &BatchEvent);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {
    fn on_event(&self, _event: &BatchEvent) {}
}
