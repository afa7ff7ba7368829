//! Extraction router: picks an extractor by file extension and cleans its output.

use lexprep_clean::TextCleaner;
use lexprep_core::{DocumentExtractor, DocumentFormat, ExtractError, ExtractedText, RoutedText};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::{DocxExtractor, PdfExtractor};

/// Routes files to the extractor registered for their format.
pub struct ExtractionRouter {
    /// Extractors by format
    extractors: HashMap<DocumentFormat, Arc<dyn DocumentExtractor>>,
    /// Cleaner applied by [`ExtractionRouter::route`]
    cleaner: TextCleaner,
}

impl ExtractionRouter {
    /// Create a router with no extractors.
    #[must_use]
    pub fn new(cleaner: TextCleaner) -> Self {
        Self {
            extractors: HashMap::new(),
            cleaner,
        }
    }

    /// Create a router with the PDF and DOCX extractors registered.
    #[must_use]
    pub fn with_defaults(cleaner: TextCleaner) -> Self {
        let mut router = Self::new(cleaner);
        router.register(PdfExtractor::new());
        router.register(DocxExtractor::new());
        router
    }

    /// Register an extractor, replacing any previous one for its format.
    pub fn register<E: DocumentExtractor + 'static>(&mut self, extractor: E) {
        self.extractors.insert(extractor.format(), Arc::new(extractor));
    }

    /// Get the extractor for a format.
    #[must_use]
    pub fn get_for_format(&self, format: DocumentFormat) -> Option<Arc<dyn DocumentExtractor>> {
        self.extractors.get(&format).cloned()
    }

    /// Formats with a registered extractor.
    #[must_use]
    pub fn supported_formats(&self) -> Vec<DocumentFormat> {
        DocumentFormat::ALL
            .into_iter()
            .filter(|format| self.extractors.contains_key(format))
            .collect()
    }

    /// The cleaner used by [`ExtractionRouter::route`].
    #[must_use]
    pub fn cleaner(&self) -> &TextCleaner {
        &self.cleaner
    }

    /// Classify a file by extension.
    pub fn classify(&self, path: &Path) -> Result<DocumentFormat, ExtractError> {
        DocumentFormat::from_path(path)
    }

    /// Extract the raw text of a file.
    pub async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError> {
        let format = self.classify(path)?;
        let extractor = self
            .get_for_format(format)
            .ok_or(ExtractError::NotRegistered(format))?;

        extractor.extract(path).await
    }

    /// Extract a file and clean the result.
    pub async fn route(&self, path: &Path) -> Result<RoutedText, ExtractError> {
        let extracted = self.extract(path).await?;
        if extracted.is_empty() {
            debug!("No text extracted from {:?}", path);
        }
        let cleaned_text = self.cleaner.clean(&extracted.text);

        debug!(
            "Routed {:?}: {} raw chars, {} cleaned chars",
            path,
            extracted.text.len(),
            cleaned_text.len()
        );

        Ok(RoutedText::new(extracted, cleaned_text))
    }
}

impl Default for ExtractionRouter {
    fn default() -> Self {
        Self::with_defaults(TextCleaner::default())
    }
}
