//! Batch pipeline: discover, route, clean, write.

use chrono::Utc;
use lexprep_core::{
    output_stem, BatchEvent, BatchObserver, BatchReport, DocumentFormat, Error, FileFailure,
    OutputPair, Result,
};
use lexprep_extract::ExtractionRouter;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::discover::collect_files;
use crate::observer::LogObserver;
use crate::output::write_pair_atomic;

/// Result of processing one file successfully.
struct Processed {
    pair: OutputPair,
    empty: bool,
}

/// Runs the router over a directory tree and writes raw and cleaned text.
///
/// Files are processed one at a time. A failure on one file is recorded and
/// the batch moves on to the next.
pub struct BatchPipeline {
    router: Arc<ExtractionRouter>,
}

impl BatchPipeline {
    /// Create a pipeline using the given router.
    pub fn new(router: Arc<ExtractionRouter>) -> Self {
        Self { router }
    }

    /// The router used for every file.
    pub fn router(&self) -> &ExtractionRouter {
        &self.router
    }

    /// Process every PDF and DOCX under `input_root`, logging progress.
    pub async fn run(
        &self,
        input_root: &Path,
        raw_dir: &Path,
        cleaned_dir: &Path,
    ) -> Result<BatchReport> {
        self.run_with_observer(input_root, raw_dir, cleaned_dir, &LogObserver)
            .await
    }

    /// Process every PDF and DOCX under `input_root`, reporting to `observer`.
    ///
    /// When no file is found the output directories are not created.
    pub async fn run_with_observer(
        &self,
        input_root: &Path,
        raw_dir: &Path,
        cleaned_dir: &Path,
        observer: &dyn BatchObserver,
    ) -> Result<BatchReport> {
        let root = input_root.to_path_buf();

        // Walk directory in background thread (blocking I/O)
        let files = tokio::task::spawn_blocking(move || collect_files(&root, &DocumentFormat::ALL))
            .await
            .map_err(|e| Error::Other(format!("scan task failed: {e}")))?;

        if files.is_empty() {
            observer.on_event(&BatchEvent::NoInputFiles {
                root: input_root.to_path_buf(),
            });
            let mut report = BatchReport::new(input_root);
            report.finished_at = Utc::now();
            return Ok(report);
        }

        self.process_files(input_root, &files, raw_dir, cleaned_dir, observer)
            .await
    }

    /// Process an explicit list of files.
    ///
    /// Creates both output directories first. Per-file errors, including
    /// unsupported extensions, end up in the report's failures.
    pub async fn process_files(
        &self,
        input_root: &Path,
        files: &[PathBuf],
        raw_dir: &Path,
        cleaned_dir: &Path,
        observer: &dyn BatchObserver,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::new(input_root);
        report.discovered = files.len();

        create_dir(raw_dir).await?;
        create_dir(cleaned_dir).await?;

        observer.on_event(&BatchEvent::BatchStarted {
            root: input_root.to_path_buf(),
            file_count: files.len(),
        });

        let mut stems = HashSet::new();

        for path in files {
            observer.on_event(&BatchEvent::FileStarted { path: path.clone() });

            match self.process_file(path, raw_dir, cleaned_dir).await {
                Ok(processed) => {
                    if processed.empty {
                        report.empty_documents += 1;
                        observer.on_event(&BatchEvent::EmptyDocument { path: path.clone() });
                    }

                    let stem = output_stem(path);
                    if !stems.insert(stem.clone()) {
                        observer.on_event(&BatchEvent::DuplicateStem {
                            path: path.clone(),
                            stem,
                        });
                    }

                    observer.on_event(&BatchEvent::FileWritten {
                        pair: processed.pair.clone(),
                    });
                    report.written.push(processed.pair);
                }
                Err(e) => {
                    let error = e.to_string();
                    observer.on_event(&BatchEvent::FileFailed {
                        path: path.clone(),
                        error: error.clone(),
                    });
                    report.failures.push(FileFailure {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }

        report.finished_at = Utc::now();
        observer.on_event(&BatchEvent::BatchFinished {
            written: report.written.len(),
            failed: report.failed(),
        });

        Ok(report)
    }

    /// Route one file and write its output pair.
    async fn process_file(
        &self,
        path: &Path,
        raw_dir: &Path,
        cleaned_dir: &Path,
    ) -> Result<Processed> {
        let routed = self.router.route(path).await?;
        let empty = routed.is_empty();
        let pair = OutputPair::for_source(path, raw_dir, cleaned_dir);

        write_pair_atomic(&pair, routed.raw_text, routed.cleaned_text).await?;

        debug!("Wrote {:?} and {:?}", pair.raw, pair.cleaned);

        Ok(Processed { pair, empty })
    }
}

async fn create_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| Error::Write {
            path: dir.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;
    use async_trait::async_trait;
    use lexprep_clean::TextCleaner;
    use lexprep_core::{DocumentExtractor, ExtractError, ExtractedText};
    use std::fs;
    use tempfile::tempdir;

    /// Returns the file's own bytes as text, or fails when the content says so.
    struct MockExtractor {
        format: DocumentFormat,
    }

    #[async_trait]
    impl DocumentExtractor for MockExtractor {
        fn format(&self) -> DocumentFormat {
            self.format
        }

        async fn extract(&self, path: &Path) -> std::result::Result<ExtractedText, ExtractError> {
            let text = tokio::fs::read_to_string(path).await?;
            if text.starts_with("FAIL") {
                return Err(ExtractError::Failed("corrupt document".to_string()));
            }
            Ok(ExtractedText::new(text, self.format))
        }
    }

    fn mock_pipeline() -> BatchPipeline {
        let mut router = ExtractionRouter::new(TextCleaner::new());
        router.register(MockExtractor {
            format: DocumentFormat::Pdf,
        });
        router.register(MockExtractor {
            format: DocumentFormat::Docx,
        });
        BatchPipeline::new(Arc::new(router))
    }

    struct Dirs {
        _temp: tempfile::TempDir,
        input: PathBuf,
        raw: PathBuf,
        cleaned: PathBuf,
    }

    fn dirs() -> Dirs {
        let temp = tempdir().unwrap();
        let input = temp.path().join("contracts");
        fs::create_dir_all(&input).unwrap();
        Dirs {
            raw: temp.path().join("out/raw"),
            cleaned: temp.path().join("out/cleaned"),
            input,
            _temp: temp,
        }
    }

    #[tokio::test]
    async fn test_naming_and_contents() {
        let d = dirs();
        fs::write(
            d.input.join("My Contract.PDF"),
            "CONFIDENTIAL\nThe Parties agree.\nPage 1 of 2\n",
        )
        .unwrap();

        let report = mock_pipeline()
            .run_with_observer(&d.input, &d.raw, &d.cleaned, &RecordingObserver::new())
            .await
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.written.len(), 1);
        assert_eq!(
            fs::read_to_string(d.raw.join("my_contract.txt")).unwrap(),
            "CONFIDENTIAL\nThe Parties agree.\nPage 1 of 2\n"
        );
        assert_eq!(
            fs::read_to_string(d.cleaned.join("my_contract_cleaned.txt")).unwrap(),
            "The Parties agree."
        );
    }

    #[tokio::test]
    async fn test_batch_isolation() {
        let d = dirs();
        fs::write(d.input.join("first.pdf"), "one").unwrap();
        fs::write(d.input.join("second.docx"), "FAIL please").unwrap();
        fs::write(d.input.join("third.pdf"), "three").unwrap();

        let observer = RecordingObserver::new();
        let report = mock_pipeline()
            .run_with_observer(&d.input, &d.raw, &d.cleaned, &observer)
            .await
            .unwrap();

        assert_eq!(report.discovered, 3);
        assert_eq!(report.written.len(), 2);
        assert_eq!(report.failed(), 1);
        assert!(report.failures[0].path.ends_with("second.docx"));
        assert!(report.failures[0].error.contains("corrupt document"));

        assert!(d.raw.join("first.txt").exists());
        assert!(d.raw.join("third.txt").exists());
        assert!(!d.raw.join("second.txt").exists());
        assert!(!d.cleaned.join("second_cleaned.txt").exists());

        let failures = observer
            .events()
            .into_iter()
            .filter(|e| matches!(e, BatchEvent::FileFailed { .. }))
            .count();
        assert_eq!(failures, 1);
    }

    #[tokio::test]
    async fn test_empty_input_creates_no_directories() {
        let d = dirs();
        fs::write(d.input.join("notes.txt"), "not a contract").unwrap();

        let observer = RecordingObserver::new();
        let report = mock_pipeline()
            .run_with_observer(&d.input, &d.raw, &d.cleaned, &observer)
            .await
            .unwrap();

        assert_eq!(report.discovered, 0);
        assert!(report.written.is_empty());
        assert!(!d.raw.exists());
        assert!(!d.cleaned.exists());

        let events = observer.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], BatchEvent::NoInputFiles { .. }));
    }

    #[tokio::test]
    async fn test_existing_output_directories_are_fine() {
        let d = dirs();
        fs::create_dir_all(&d.raw).unwrap();
        fs::create_dir_all(&d.cleaned).unwrap();
        fs::write(d.input.join("nda.docx"), "text").unwrap();

        let report = mock_pipeline()
            .run_with_observer(&d.input, &d.raw, &d.cleaned, &RecordingObserver::new())
            .await
            .unwrap();

        assert!(report.is_success());
        assert!(d.cleaned.join("nda_cleaned.txt").exists());
    }

    #[tokio::test]
    async fn test_unsupported_file_is_isolated() {
        let d = dirs();
        let csv = d.input.join("file.csv");
        let pdf = d.input.join("lease.pdf");
        fs::write(&csv, "a,b,c").unwrap();
        fs::write(&pdf, "lease").unwrap();

        let report = mock_pipeline()
            .process_files(
                &d.input,
                &[csv.clone(), pdf],
                &d.raw,
                &d.cleaned,
                &RecordingObserver::new(),
            )
            .await
            .unwrap();

        assert_eq!(report.written.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, csv);
        assert!(report.failures[0].error.contains(".csv"));
        assert!(!d.raw.join("file.txt").exists());
        assert!(d.raw.join("lease.txt").exists());
    }

    #[tokio::test]
    async fn test_empty_document_is_written_and_reported() {
        let d = dirs();
        fs::write(d.input.join("blank.pdf"), "  \n").unwrap();

        let observer = RecordingObserver::new();
        let report = mock_pipeline()
            .run_with_observer(&d.input, &d.raw, &d.cleaned, &observer)
            .await
            .unwrap();

        assert_eq!(report.empty_documents, 1);
        assert_eq!(report.written.len(), 1);
        assert_eq!(
            fs::read_to_string(d.cleaned.join("blank_cleaned.txt")).unwrap(),
            ""
        );
        assert!(observer
            .events()
            .iter()
            .any(|e| matches!(e, BatchEvent::EmptyDocument { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_stem_overwrites_and_warns() {
        let d = dirs();
        let first = d.input.join("a/Lease.pdf");
        let second = d.input.join("b/lease.docx");
        fs::create_dir_all(first.parent().unwrap()).unwrap();
        fs::create_dir_all(second.parent().unwrap()).unwrap();
        fs::write(&first, "first").unwrap();
        fs::write(&second, "second").unwrap();

        let observer = RecordingObserver::new();
        let report = mock_pipeline()
            .process_files(
                &d.input,
                &[first, second.clone()],
                &d.raw,
                &d.cleaned,
                &observer,
            )
            .await
            .unwrap();

        assert_eq!(report.written.len(), 2);
        assert_eq!(fs::read_to_string(d.raw.join("lease.txt")).unwrap(), "second");

        let duplicates: Vec<_> = observer
            .events()
            .into_iter()
            .filter_map(|e| match e {
                BatchEvent::DuplicateStem { path, stem } => Some((path, stem)),
                _ => None,
            })
            .collect();
        assert_eq!(duplicates, vec![(second, "lease".to_string())]);
    }

    #[tokio::test]
    async fn test_failed_cleaned_write_keeps_previous_raw_output() {
        let d = dirs();
        fs::create_dir_all(&d.raw).unwrap();
        fs::write(d.raw.join("x.txt"), "OLD").unwrap();
        fs::create_dir_all(d.cleaned.join("x_cleaned.txt")).unwrap();
        fs::write(d.input.join("x.pdf"), "v1").unwrap();

        let report = mock_pipeline()
            .run_with_observer(&d.input, &d.raw, &d.cleaned, &RecordingObserver::new())
            .await
            .unwrap();

        assert_eq!(report.failed(), 1);
        assert!(report.written.is_empty());
        assert!(report.failures[0].path.ends_with("x.pdf"));
        assert_eq!(fs::read_to_string(d.raw.join("x.txt")).unwrap(), "OLD");
        assert!(d.cleaned.join("x_cleaned.txt").is_dir());
    }

    #[tokio::test]
    async fn test_event_sequence() {
        let d = dirs();
        fs::write(d.input.join("only.pdf"), "text").unwrap();

        let observer = RecordingObserver::new();
        mock_pipeline()
            .run_with_observer(&d.input, &d.raw, &d.cleaned, &observer)
            .await
            .unwrap();

        let events = observer.events();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], BatchEvent::BatchStarted { file_count: 1, .. }));
        assert!(matches!(events[1], BatchEvent::FileStarted { .. }));
        assert!(matches!(events[2], BatchEvent::FileWritten { .. }));
        assert!(matches!(
            events[3],
            BatchEvent::BatchFinished {
                written: 1,
                failed: 0
            }
        ));
    }

    #[tokio::test]
    async fn test_unwritable_output_directory_fails_run() {
        let d = dirs();
        fs::write(d.input.join("x.pdf"), "text").unwrap();
        let blocker = d.input.parent().unwrap().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let result = mock_pipeline()
            .run_with_observer(&d.input, &blocker.join("raw"), &d.cleaned, &RecordingObserver::new())
            .await;

        assert!(matches!(result, Err(Error::Write { .. })));
    }
}
