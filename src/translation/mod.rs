//! Document-level translation: segmenting, prompting, and batched execution.

mod batch;
mod prompt;
mod segment;

pub use batch::{BatchSettings, BatchTranslator, DocumentReport, SegmentOutcome};
pub use prompt::{Glossary, build_prompt};
pub use segment::{
    DEFAULT_BATCH_SIZE, DEFAULT_DELIMITER, DocumentStats, SAFE_SEGMENT_WORDS, TARGET_SUFFIX,
    make_batches, split_document, target_path,
};
