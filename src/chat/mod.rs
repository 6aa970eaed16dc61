//! Interactive conversation on a stored session.
//!
//! Provides a REPL-style interface with slash commands that manage the session.

/// Slash command parsing and autocomplete.
pub mod command;
mod repl;
mod ui;

pub use repl::ChatRepl;
