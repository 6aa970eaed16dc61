use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::message::Message;

/// A single, non-retrying call to a remote language model.
///
/// Implementations make exactly one attempt per call; retry policy lives in
/// [`super::RequestExecutor`].
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends an ordered conversation and returns the model's reply.
    async fn chat(&self, messages: &[Message]) -> Result<Message>;

    /// Sends a free-form prompt and returns every candidate completion.
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<Vec<String>>;
}

/// Free-form completion prompt with sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionPrompt {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub stop: Vec<String>,
}

impl CompletionPrompt {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: 0.9,
            max_tokens: 500,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.6,
            stop: vec!["I:".to_string(), "They:".to_string()],
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Serialize)]
struct TextCompletionRequest<'a> {
    model: &'a str,
    #[serde(flatten)]
    prompt: &'a CompletionPrompt,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct TextCompletionResponse {
    choices: Vec<TextChoice>,
}

#[derive(Debug, Deserialize)]
struct TextChoice {
    text: String,
}

/// HTTP client for OpenAI-compatible `/v1/chat/completions` and `/v1/completions`.
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    chat_model: String,
    completion_model: String,
}

impl OpenAiClient {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        chat_model: String,
        completion_model: String,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            chat_model,
            completion_model,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.endpoint.trim_end_matches('/'))
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        let mut http_request = self.client.post(&url).json(body);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("API request failed with status {status}: {body}");
        }

        response
            .json::<R>()
            .await
            .with_context(|| format!("Malformed response from {url}"))
    }
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn chat(&self, messages: &[Message]) -> Result<Message> {
        let request = ChatCompletionRequest {
            model: &self.chat_model,
            messages,
        };
        let response: ChatCompletionResponse = self.post("chat/completions", &request).await?;
        first_message(response)
    }

    async fn complete(&self, prompt: &CompletionPrompt) -> Result<Vec<String>> {
        let request = TextCompletionRequest {
            model: &self.completion_model,
            prompt,
        };
        let response: TextCompletionResponse = self.post("completions", &request).await?;
        Ok(completion_texts(response))
    }
}

fn first_message(response: ChatCompletionResponse) -> Result<Message> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .context("API response contained no choices")
}

fn completion_texts(response: TextCompletionResponse) -> Vec<String> {
    response
        .choices
        .into_iter()
        .map(|choice| choice.text.trim().to_string())
        .collect()
}
