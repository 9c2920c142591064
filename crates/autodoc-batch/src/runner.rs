use std::time::Instant;

use autodoc_config::TransformConfig;
use autodoc_engine::SourceEngine;

use crate::report::ResultReport;
use crate::select::{is_writable, FileCandidate};
use crate::BatchOutcome::{Failed, ReadOnly, Skipped, Succeeded};

/// Terminal classification of one candidate after an attempted processing
/// pass. Folded into the report counters immediately; never persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BatchOutcome {
    Succeeded,
    Failed(String),
    Skipped(String),
    ReadOnly,
}

/// Sequential processing loop.
///
/// Every candidate reaches exactly one terminal classification, and a
/// failure on one file never aborts the batch: the engine adapter gives each
/// file a fresh invocation context, the error is recorded for diagnostics,
/// and the loop moves on. A file that vanished between selection and
/// processing counts as failed; an engine failure counts as skipped. The two
/// are kept apart deliberately, matching the behaviour of the system this
/// replaces.
pub struct BatchRunner<'a> {
    config: &'a TransformConfig,
}

impl<'a> BatchRunner<'a> {
    pub fn new(config: &'a TransformConfig) -> Self {
        BatchRunner { config }
    }

    /// Process `candidates` in order and return the aggregate report.
    /// `started` is captured by the caller before selection and bootstrap so
    /// the elapsed time covers the whole run, not just the loop.
    pub fn run(
        &self,
        candidates: &[FileCandidate],
        engine: &dyn SourceEngine,
        started: Instant,
    ) -> ResultReport {
        let mut report = ResultReport::default();

        for candidate in candidates {
            let outcome = self.classify(candidate, engine);
            match &outcome {
                Succeeded => {
                    tracing::info!(file = %candidate.path.display(), "documented");
                    report.succeeded += 1;
                }
                Failed(reason) => {
                    tracing::warn!(file = %candidate.path.display(), %reason, "failed");
                    report.failed += 1;
                }
                Skipped(reason) => {
                    tracing::warn!(file = %candidate.path.display(), %reason, "skipped");
                    report.skipped += 1;
                }
                ReadOnly => {
                    tracing::info!(file = %candidate.path.display(), "read-only, not touched");
                    report.read_only += 1;
                }
            }
        }

        report.elapsed = started.elapsed();
        report
    }

    fn classify(&self, candidate: &FileCandidate, engine: &dyn SourceEngine) -> BatchOutcome {
        // Selection-time flags are only a snapshot; re-check both.
        if !candidate.path.exists() {
            return Failed("file no longer exists".to_string());
        }
        if !is_writable(&candidate.path) {
            return ReadOnly;
        }

        match engine.process(&candidate.path, self.config) {
            Ok(()) => Succeeded,
            Err(err) => Skipped(err.to_string()),
        }
    }
}
