//! Scripted language model backends shared by the integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use texlate::llm::{ChatBackend, CompletionPrompt, Message};

const CASE_HEADER: &str = "Original LaTeX in English:\n";
const ANSWER_HEADER: &str = "\n\nTranslated LaTeX in Chinese:\n";

/// Segments containing this marker always fail.
pub const POISON: &str = "POISON";

/// Pulls the source segment back out of a translation prompt.
pub fn segment_of(prompt: &str) -> &str {
    let start = prompt.rfind(CASE_HEADER).map_or(0, |i| i + CASE_HEADER.len());
    let case = &prompt[start..];
    case.strip_suffix(ANSWER_HEADER).unwrap_or(case)
}

/// Answers every translation prompt with the source segment followed by `'`.
///
/// Each call holds a slot for a short delay so overlapping calls can be counted.
#[derive(Default)]
pub struct ScriptedTranslator {
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub peak: AtomicUsize,
    pub seen: Mutex<Vec<String>>,
}

impl ScriptedTranslator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, segment: &str) -> usize {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.as_str() == segment)
            .count()
    }
}

#[async_trait]
impl ChatBackend for ScriptedTranslator {
    async fn chat(&self, messages: &[Message]) -> anyhow::Result<Message> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let prompt = messages.last().map_or("", |m| m.content.as_str());
        let segment = segment_of(prompt).to_string();
        self.seen.lock().unwrap().push(segment.clone());

        if segment.contains(POISON) {
            anyhow::bail!("model rejected the request");
        }
        Ok(Message::assistant(format!("{segment}'")))
    }

    async fn complete(&self, _prompt: &CompletionPrompt) -> anyhow::Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Replies with the number of messages it was sent.
#[derive(Default)]
pub struct CountingBackend {
    pub calls: AtomicUsize,
}

#[async_trait]
impl ChatBackend for CountingBackend {
    async fn chat(&self, messages: &[Message]) -> anyhow::Result<Message> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Message::assistant(format!("{} messages", messages.len())))
    }

    async fn complete(&self, _prompt: &CompletionPrompt) -> anyhow::Result<Vec<String>> {
        Ok(Vec::new())
    }
}
