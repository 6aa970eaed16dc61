//! One-shot prompt command handler.

use anyhow::Result;

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::llm::{Completion, CompletionPrompt, RequestExecutor};
use crate::ui::Spinner;

pub struct AskOptions {
    pub prompt: String,
    pub completion: bool,
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// Sends a single prompt and prints the reply to stdout.
///
/// A request that exhausts its retries prints the failure sentinel rather than
/// returning an error, matching how translated segments degrade.
pub async fn run_ask(options: AskOptions) -> Result<()> {
    let manager = ConfigManager::new();
    let config_file = manager.load_or_default()?;
    let resolved = resolve_config(&resolve_options(&options), &config_file)?;
    let executor = resolved.executor();

    let spinner = Spinner::new("Asking...");
    let reply = ask(&executor, &options.prompt, options.completion).await;
    spinner.stop();

    println!("{}", reply.into_text_or_sentinel());
    Ok(())
}

/// `--model` names the model of whichever request shape is used.
fn resolve_options(options: &AskOptions) -> ResolveOptions {
    let (model, completion_model) = if options.completion {
        (None, options.model.clone())
    } else {
        (options.model.clone(), None)
    };
    ResolveOptions {
        provider: options.provider.clone(),
        model,
        completion_model,
        ..ResolveOptions::default()
    }
}

async fn ask(executor: &RequestExecutor, prompt: &str, completion: bool) -> Completion<String> {
    if completion {
        executor
            .complete(&CompletionPrompt::new(prompt))
            .await
            .map(|choices| choices.into_iter().next().unwrap_or_default())
    } else {
        executor.ask_once(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatBackend, FAILURE_SENTINEL, Message};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Canned;

    #[async_trait]
    impl ChatBackend for Canned {
        async fn chat(&self, messages: &[Message]) -> anyhow::Result<Message> {
            Ok(Message::assistant(format!("{} messages", messages.len())))
        }

        async fn complete(&self, prompt: &CompletionPrompt) -> anyhow::Result<Vec<String>> {
            Ok(vec![format!("completed {}", prompt.prompt)])
        }
    }

    struct Down;

    #[async_trait]
    impl ChatBackend for Down {
        async fn chat(&self, _messages: &[Message]) -> anyhow::Result<Message> {
            anyhow::bail!("connection refused")
        }

        async fn complete(&self, _prompt: &CompletionPrompt) -> anyhow::Result<Vec<String>> {
            anyhow::bail!("connection refused")
        }
    }

    fn options(completion: bool) -> AskOptions {
        AskOptions {
            prompt: "hi".to_string(),
            completion,
            provider: Some("local".to_string()),
            model: Some("qwen2.5:14b".to_string()),
        }
    }

    #[test]
    fn test_model_flag_targets_chat_shape() {
        let resolve = resolve_options(&options(false));
        assert_eq!(resolve.model.as_deref(), Some("qwen2.5:14b"));
        assert!(resolve.completion_model.is_none());
        assert_eq!(resolve.provider.as_deref(), Some("local"));
    }

    #[test]
    fn test_model_flag_targets_completion_shape() {
        let resolve = resolve_options(&options(true));
        assert!(resolve.model.is_none());
        assert_eq!(resolve.completion_model.as_deref(), Some("qwen2.5:14b"));
    }

    #[tokio::test]
    async fn test_chat_shape_sends_system_and_user() {
        let executor = RequestExecutor::new(Arc::new(Canned), 0);
        let reply = ask(&executor, "hi", false).await;
        assert_eq!(reply, Completion::Reply("2 messages".to_string()));
    }

    #[tokio::test]
    async fn test_completion_shape_takes_first_choice() {
        let executor = RequestExecutor::new(Arc::new(Canned), 0);
        let reply = ask(&executor, "hi", true).await;
        assert_eq!(reply, Completion::Reply("completed hi".to_string()));
    }

    #[tokio::test]
    async fn test_failure_prints_sentinel() {
        let executor = RequestExecutor::new(Arc::new(Down), 1);
        let reply = ask(&executor, "hi", true).await;
        assert_eq!(reply.into_text_or_sentinel(), FAILURE_SENTINEL);
    }
}
