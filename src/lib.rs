//! # texlate - LaTeX Paper Translation CLI
//!
//! `texlate` translates English LaTeX papers into Chinese through an
//! OpenAI-compatible chat API. The document is split into segments, segments
//! are translated concurrently in fixed-size batches, and each batch is
//! appended to a sibling `_tl` file as soon as it finishes.
//!
//! ## Features
//!
//! - **Batch translation**: Bounded concurrency with incremental output
//! - **Bounded retry**: Failed segments degrade to a marker instead of aborting the run
//! - **Stored sessions**: Named conversations persisted as JSON with `texlate chat`
//! - **Multiple providers**: Configure and switch between different API providers
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a paper into paper_tl.tex
//! texlate ./paper.tex
//!
//! # Smaller batches, at most 4 requests in flight
//! texlate -b 8 -j 4 ./paper.tex
//!
//! # Continue a stored conversation
//! texlate chat --session review
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/texlate/config.toml`:
//!
//! ```toml
//! [texlate]
//! provider = "openai"
//! model = "gpt-3.5-turbo"
//!
//! [glossary.terms]
//! prompt = "提示词"
//!
//! [providers.openai]
//! endpoint = "https://api.openai.com"
//! api_key_env = "OPENAI_API_KEY"
//! ```

/// Interactive chat mode on stored sessions.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// File system utilities.
pub mod fs;

/// Source document reading.
pub mod input;

/// Language model client, messages, and retrying request executor.
pub mod llm;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration and session data.
pub mod paths;

/// Conversation sessions and their durable store.
pub mod session;

/// Document segmentation, prompt construction, and batch translation.
pub mod translation;

/// Terminal UI components (spinner, progress bar, colors).
pub mod ui;
