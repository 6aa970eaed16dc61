//! Subcommand implementations.

/// One-shot prompt command handler.
pub mod ask;

/// Chat mode command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// Provider listing command handler.
pub mod providers;

/// Document translation command handler.
pub mod translate;
