use indicatif::{ProgressBar, ProgressStyle};

use crate::output;

/// Progress bar over the batches of a document translation.
pub struct BatchProgress {
    progress_bar: ProgressBar,
}

impl BatchProgress {
    /// Creates a bar with `total` steps, hidden in quiet mode.
    #[allow(clippy::unwrap_used)]
    pub fn new(total: u64) -> Self {
        let progress_bar = if output::is_quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total)
        };
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} batches {msg} [{elapsed_precise}]")
                .unwrap()
                .progress_chars("##-"),
        );

        Self { progress_bar }
    }

    /// Records that `done` of `total` batches have been written.
    pub fn update(&self, done: usize, total: usize) {
        self.progress_bar.set_length(total as u64);
        self.progress_bar.set_position(done as u64);
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl Drop for BatchProgress {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_sets_length_before_any_batch_finishes() {
        let progress = BatchProgress::new(0);
        progress.update(0, 3);
        assert_eq!(progress.progress_bar.length(), Some(3));
        assert_eq!(progress.progress_bar.position(), 0);

        progress.update(2, 3);
        assert_eq!(progress.progress_bar.position(), 2);
    }
}
