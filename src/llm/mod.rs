//! Request execution against OpenAI-compatible language model endpoints.
//!
//! [`ChatBackend`] performs exactly one remote call; [`RequestExecutor`] layers the
//! bounded retry policy on top and folds failures into a [`Completion`].

mod client;
mod executor;
mod message;

pub use client::{ChatBackend, CompletionPrompt, OpenAiClient};
pub use executor::{
    Completion, DEFAULT_RETRY, FAILURE_SENTINEL, MAX_RETRY, RequestExecutor, RequestFailure,
};
pub use message::{Message, Role};
