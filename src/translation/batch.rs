use anyhow::{Context, Result};
use futures_util::future::join_all;
use std::path::Path;
use tokio::sync::Semaphore;

use super::prompt::{Glossary, build_prompt};
use super::segment::{
    DEFAULT_BATCH_SIZE, DEFAULT_DELIMITER, DocumentStats, SAFE_SEGMENT_WORDS, make_batches,
    split_document,
};
use crate::llm::{Completion, FAILURE_SENTINEL, RequestExecutor, RequestFailure};
use crate::session::Session;
use crate::ui::Style;

/// Tunables for a [`BatchTranslator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSettings {
    /// Segments translated concurrently before the next batch starts.
    pub batch_size: usize,
    /// Separator used both to split the source and to join the output.
    pub delimiter: String,
    /// Cap on in-flight requests across the whole run; `None` means one per segment.
    pub max_concurrency: Option<usize>,
    pub glossary: Glossary,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            delimiter: DEFAULT_DELIMITER.to_string(),
            max_concurrency: None,
            glossary: Glossary::default(),
        }
    }
}

/// Result of translating one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentOutcome {
    /// Blank segment passed through without a request.
    Skipped(String),
    Translated(String),
    /// The request failed; the segment is replaced by [`FAILURE_SENTINEL`].
    Failed(RequestFailure),
}

impl SegmentOutcome {
    /// Text written to the output for this segment.
    pub fn text(&self) -> &str {
        match self {
            Self::Skipped(text) | Self::Translated(text) => text,
            Self::Failed(_) => FAILURE_SENTINEL,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Skipped(text) | Self::Translated(text) => text,
            Self::Failed(_) => FAILURE_SENTINEL.to_string(),
        }
    }
}

/// Per-document tally, so degraded output can be told apart from a full translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentReport {
    pub segments: usize,
    pub translated: usize,
    pub skipped: usize,
    /// Indexes of segments replaced by the failure sentinel, in document order.
    pub failed: Vec<usize>,
}

impl DocumentReport {
    pub const fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, index: usize, outcome: &SegmentOutcome) {
        self.segments += 1;
        match outcome {
            SegmentOutcome::Skipped(_) => self.skipped += 1,
            SegmentOutcome::Translated(_) => self.translated += 1,
            SegmentOutcome::Failed(_) => self.failed.push(index),
        }
    }
}

/// Translates a document batch by batch, appending each batch to the output file.
///
/// Segments within a batch run concurrently, each in its own throwaway [`Session`];
/// batches run strictly one after another.
pub struct BatchTranslator {
    executor: RequestExecutor,
    settings: BatchSettings,
    limiter: Option<Semaphore>,
}

impl BatchTranslator {
    pub fn new(executor: RequestExecutor, settings: BatchSettings) -> Self {
        let limiter = settings
            .max_concurrency
            .map(|permits| Semaphore::new(permits.max(1)));
        Self {
            executor,
            settings,
            limiter,
        }
    }

    /// Translates one segment. Blank segments are returned as-is without a request.
    pub async fn translate_segment(&self, segment: &str) -> SegmentOutcome {
        if segment.trim().is_empty() {
            return SegmentOutcome::Skipped(segment.to_string());
        }

        let _permit = match &self.limiter {
            Some(limiter) => limiter.acquire().await.ok(),
            None => None,
        };

        let prompt = build_prompt(segment, &self.settings.glossary);
        let mut session = Session::default();
        match session.ask(&self.executor, &prompt).await {
            Completion::Reply(text) => SegmentOutcome::Translated(text),
            Completion::Failed(failure) => SegmentOutcome::Failed(failure),
        }
    }

    pub async fn run(&self, document: &str, target: &Path) -> Result<DocumentReport> {
        self.run_with_progress(document, target, |_, _| {}).await
    }

    /// Translates `document` and appends the result to `target`.
    ///
    /// `on_batch(done, total)` is called once with `done = 0` before the first
    /// request, then after each batch has been written.
    pub async fn run_with_progress(
        &self,
        document: &str,
        target: &Path,
        mut on_batch: impl FnMut(usize, usize),
    ) -> Result<DocumentReport> {
        let delimiter = self.settings.delimiter.as_str();
        let segments = split_document(document, delimiter);

        let stats = DocumentStats::of(&segments);
        crate::status!(
            "{} {}; {} {}",
            Style::label("Total segments:"),
            Style::value(stats.segments),
            Style::label("max segment word count:"),
            Style::value(stats.max_words)
        );
        if stats.exceeds_safe_length() {
            crate::warn!(
                "{} A segment has {} words; keep segments below {SAFE_SEGMENT_WORDS} words to stay safe.",
                Style::warning("Warning:"),
                stats.max_words
            );
        }

        let batches = make_batches(&segments, self.settings.batch_size);
        let mut report = DocumentReport::default();
        let mut offset = 0;
        on_batch(0, batches.len());

        for (index, batch) in batches.iter().enumerate() {
            let outcomes = join_all(batch.iter().map(|segment| self.translate_segment(segment))).await;

            let mut texts = Vec::with_capacity(outcomes.len() + 1);
            for (position, outcome) in outcomes.into_iter().enumerate() {
                report.record(offset + position, &outcome);
                texts.push(outcome.into_text());
            }
            // Trailing marker so the next batch starts after a delimiter.
            texts.push(String::new());

            crate::fs::append(target, &texts.join(delimiter))
                .with_context(|| format!("Failed to append to output file: {}", target.display()))?;

            offset += batch.len();
            on_batch(index + 1, batches.len());
        }

        Ok(report)
    }
}
