//! Where texlate writes what.
//!
//! A translated document only ever lands in its `_tl` file. Stdout carries
//! the text a user asked for (chat and `ask` replies, provider listings) so
//! it can be piped. Batch status, retry notices, the spinner and the progress
//! bar describe the run itself and go to stderr. `--quiet` silences them;
//! warnings still print.

use std::ffi::OsString;
use std::sync::OnceLock;

static OUTPUT: OnceLock<Output> = OnceLock::new();

/// Process-wide output settings, fixed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Hide status lines, the spinner and the progress bar.
    pub quiet: bool,
    /// Paint labels and notices with ANSI colors.
    pub color: bool,
}

impl Output {
    /// Settings for this process: `quiet` from the command line, colors unless
    /// `NO_COLOR` is set to a non-empty value.
    pub fn from_env(quiet: bool) -> Self {
        Self {
            quiet,
            color: color_enabled(std::env::var_os("NO_COLOR")),
        }
    }
}

// https://no-color.org/
fn color_enabled(no_color: Option<OsString>) -> bool {
    no_color.is_none_or(|value| value.is_empty())
}

/// Fixes the settings for the rest of the process. Later calls are ignored.
pub fn init(output: Output) {
    let _ = OUTPUT.set(output);
}

fn current() -> &'static Output {
    OUTPUT.get_or_init(|| Output::from_env(false))
}

pub fn is_quiet() -> bool {
    current().quiet
}

pub fn uses_color() -> bool {
    current().color
}

/// Prints a line about the run to stderr unless `--quiet` is set.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Prints to stderr even under `--quiet`.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_disables_color_only_when_non_empty() {
        assert!(color_enabled(None));
        assert!(color_enabled(Some(OsString::new())));
        assert!(!color_enabled(Some(OsString::from("1"))));
    }

    #[test]
    fn test_from_env_keeps_quiet_flag() {
        assert!(Output::from_env(true).quiet);
        assert!(!Output::from_env(false).quiet);
    }
}
