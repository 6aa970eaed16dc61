use std::path::{Path, PathBuf};

/// Segments are separated by blank lines unless configured otherwise.
pub const DEFAULT_DELIMITER: &str = "\n\n";

/// Number of segments translated concurrently in one batch.
pub const DEFAULT_BATCH_SIZE: usize = 15;

/// Segments longer than this many words risk exceeding the model's context.
pub const SAFE_SEGMENT_WORDS: usize = 1000;

/// Inserted between the file stem and extension of the output file.
pub const TARGET_SUFFIX: &str = "_tl";

/// Splits `text` on every occurrence of `delimiter`.
///
/// Joining the result with the same delimiter reproduces `text` exactly. An empty
/// delimiter yields the whole text as one segment.
pub fn split_document<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![text];
    }
    text.split(delimiter).collect()
}

/// Groups consecutive items into batches of `size`; the last batch may be shorter.
pub fn make_batches<T>(items: &[T], size: usize) -> Vec<&[T]> {
    items.chunks(size.max(1)).collect()
}

/// Size figures reported before a document is translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub segments: usize,
    pub max_words: usize,
}

impl DocumentStats {
    pub fn of(segments: &[&str]) -> Self {
        Self {
            segments: segments.len(),
            max_words: segments
                .iter()
                .map(|segment| segment.split_whitespace().count())
                .max()
                .unwrap_or(0),
        }
    }

    pub const fn exceeds_safe_length(&self) -> bool {
        self.max_words > SAFE_SEGMENT_WORDS
    }
}

/// Output path next to `source`: `paper.tex` becomes `paper_tl.tex`.
pub fn target_path(source: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = source.extension().map_or_else(
        || format!("{stem}{TARGET_SUFFIX}"),
        |ext| format!("{stem}{TARGET_SUFFIX}.{}", ext.to_string_lossy()),
    );
    source.with_file_name(file_name)
}
