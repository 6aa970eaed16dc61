use anyhow::{Context, Result, bail};
use inquire::Text;
use std::fs;
use std::path::{Path, PathBuf};

/// Largest source document accepted, in bytes.
pub const MAX_INPUT_SIZE: usize = 4 * 1024 * 1024;

pub struct InputReader;

impl InputReader {
    /// Reads the whole document at `path` into memory.
    pub fn read(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(
                "Error: Input size ({:.1} MB) exceeds maximum allowed size ({} MB).\n\n\
                 Consider splitting the document into smaller files.",
                size as f64 / 1024.0 / 1024.0,
                MAX_INPUT_SIZE / 1024 / 1024
            );
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Asks the user for the path of the document to translate.
    pub fn prompt_path() -> Result<PathBuf> {
        let answer = Text::new("Input .tex file path:")
            .with_help_message("The translation is written next to it with a _tl suffix")
            .prompt()?;

        let answer = answer.trim();
        if answer.is_empty() {
            bail!("Error: No input file given");
        }
        Ok(PathBuf::from(answer))
    }
}
