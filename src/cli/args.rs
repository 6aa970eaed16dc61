use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "texlate")]
#[command(about = "Translate LaTeX papers from English to Chinese with a chat model")]
#[command(version)]
pub struct Args {
    /// LaTeX file to translate (prompted for if not provided)
    pub file: Option<PathBuf>,

    /// Provider name from config.toml
    #[arg(short = 'p', long, global = true)]
    pub provider: Option<String>,

    /// Model name (the completion model with `ask --completion`)
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Segments translated concurrently per batch
    #[arg(short = 'b', long)]
    pub batch_size: Option<usize>,

    /// Cap on in-flight requests across the whole run
    #[arg(short = 'j', long)]
    pub max_concurrency: Option<usize>,

    /// Suppress progress and status output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive conversation on a stored session
    Chat {
        /// Session name
        #[arg(short = 's', long, default_value = crate::session::DEFAULT_SESSION_ID)]
        session: String,

        /// Replace the session role (clears its history)
        #[arg(short = 'r', long)]
        role: Option<String>,

        /// Non-system messages kept in the session
        #[arg(short = 'l', long)]
        limit: Option<usize>,
    },
    /// Send one prompt without keeping any history
    Ask {
        /// Prompt text
        prompt: String,

        /// Use the free-form completion endpoint instead of chat
        #[arg(long)]
        completion: bool,
    },
    /// List configured providers
    Providers {
        /// Show details for a specific provider
        provider: Option<String>,
    },
    /// Choose the default provider and model
    Configure,
}
