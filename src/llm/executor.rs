use anyhow::Result;
use std::future::Future;
use std::sync::Arc;

use super::client::{ChatBackend, CompletionPrompt};
use super::message::Message;
use crate::ui::Style;

/// Number of retries after the first failed attempt.
pub const DEFAULT_RETRY: u32 = 5;

/// Largest retry count accepted from configuration.
pub const MAX_RETRY: u32 = 100;

/// Text substituted into a document for a segment whose request failed.
pub const FAILURE_SENTINEL: &str = "Failed to reach the language model!";

const STATELESS_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Why a request ended without a reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("language model request failed after {attempts} attempt(s): {reason}")]
pub struct RequestFailure {
    /// Total attempts made, including the first one.
    pub attempts: u32,
    /// Error reported by the last attempt.
    pub reason: String,
}

/// Outcome of a request once the retry budget has been spent.
///
/// Both request shapes report failure the same way, so callers never have to
/// compare against an in-band marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T> {
    Reply(T),
    Failed(RequestFailure),
}

impl<T> Completion<T> {
    pub fn reply(self) -> Option<T> {
        match self {
            Self::Reply(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Completion<U> {
        match self {
            Self::Reply(value) => Completion::Reply(f(value)),
            Self::Failed(failure) => Completion::Failed(failure),
        }
    }
}

impl Completion<String> {
    /// Returns the reply text, or [`FAILURE_SENTINEL`] if the request failed.
    pub fn into_text_or_sentinel(self) -> String {
        self.reply().unwrap_or_else(|| FAILURE_SENTINEL.to_string())
    }
}

/// Issues requests through a [`ChatBackend`] with immediate, bounded retry.
///
/// The credential and endpoint live in the backend, which is injected here;
/// there is no process-wide client state.
pub struct RequestExecutor {
    backend: Arc<dyn ChatBackend>,
    retry: u32,
}

impl RequestExecutor {
    pub fn new(backend: Arc<dyn ChatBackend>, retry: u32) -> Self {
        Self { backend, retry }
    }

    /// Sends a full conversation and returns the model's reply message.
    pub async fn chat(&self, messages: &[Message]) -> Completion<Message> {
        self.with_retry(|| self.backend.chat(messages)).await
    }

    /// Sends a free-form prompt and returns every candidate completion.
    pub async fn complete(&self, prompt: &CompletionPrompt) -> Completion<Vec<String>> {
        self.with_retry(|| self.backend.complete(prompt)).await
    }

    /// One exchange with no history beyond a generic system instruction.
    pub async fn ask_once(&self, prompt: &str) -> Completion<String> {
        let messages = [Message::system(STATELESS_SYSTEM_PROMPT), Message::user(prompt)];
        self.chat(&messages).await.map(|reply| reply.content)
    }

    async fn with_retry<T, F, Fut>(&self, mut attempt: F) -> Completion<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut failures: u32 = 0;
        loop {
            match attempt().await {
                Ok(value) => return Completion::Reply(value),
                Err(e) => {
                    failures = failures.saturating_add(1);
                    if failures > self.retry {
                        crate::warn!(
                            "{} Language model unreachable after {failures} attempt(s): {e:#}",
                            Style::error("Error:")
                        );
                        return Completion::Failed(RequestFailure {
                            attempts: failures,
                            reason: format!("{e:#}"),
                        });
                    }
                    crate::status!(
                        "{} Request failed (count={failures}): {e:#}. Retrying...",
                        Style::warning("Warning:")
                    );
                }
            }
        }
    }
}
