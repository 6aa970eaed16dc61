use anyhow::Result;
use inquire::InquireError;

mod progress;
mod spinner;
mod style;

pub use progress::BatchProgress;
pub use spinner::Spinner;
pub use style::Style;

/// Check if the inquire error is a user cancellation/interruption.
const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Returns `true` if `err` was caused by the user cancelling an interactive prompt.
pub fn is_cancellation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<InquireError>()
        .is_some_and(is_prompt_cancelled)
}

/// Wraps a function that uses interactive prompts and handles user cancellation gracefully.
///
/// If the user cancels the prompt (Ctrl+C or Escape), this function prints a newline
/// to clean up the terminal and returns `Ok(())` instead of propagating the error.
pub fn handle_prompt_cancellation<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match f() {
        Ok(()) => Ok(()),
        Err(e) if is_cancellation(&e) => {
            println!();
            Ok(())
        }
        Err(e) => Err(e),
    }
}
