//! Batch observers.

use lexprep_core::{BatchEvent, BatchObserver};
use std::sync::Mutex;
use tracing::{error, info, warn};

/// Observer that reports progress through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl BatchObserver for LogObserver {
    fn on_event(&self, event: &BatchEvent) {
        match event {
            BatchEvent::NoInputFiles { root } => {
                warn!("No valid files found to process in {:?}", root);
            }
            BatchEvent::BatchStarted { root, file_count } => {
                info!("Processing {} files from {:?}", file_count, root);
            }
            BatchEvent::FileStarted { path } => {
                info!("Processing: {}", path.display());
            }
            BatchEvent::EmptyDocument { path } => {
                warn!("No text extracted from {}", path.display());
            }
            BatchEvent::DuplicateStem { path, stem } => {
                warn!(
                    "{} overwrites earlier output for stem '{}'",
                    path.display(),
                    stem
                );
            }
            BatchEvent::FileWritten { pair } => {
                info!(
                    "Saved: {} and {}",
                    pair.raw.display(),
                    pair.cleaned.display()
                );
            }
            BatchEvent::FileFailed { path, error } => {
                error!("Failed to process {}: {}", path.display(), error);
            }
            BatchEvent::BatchFinished { written, failed } => {
                info!("Batch finished: {} written, {} failed", written, failed);
            }
        }
    }
}

/// Observer that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<BatchEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<BatchEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl BatchObserver for RecordingObserver {
    fn on_event(&self, event: &BatchEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
