use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::llm::{Completion, Message, RequestExecutor, Role};

/// Non-system messages kept by a fresh session.
pub const DEFAULT_MESSAGE_LIMIT: usize = 100;

/// Role used for the system instruction when none is configured.
pub const DEFAULT_ROLE: &str = "a helpful assistant";

/// Identifier of a session created without a name.
pub const DEFAULT_SESSION_ID: &str = "default";

/// A named conversation with a bounded message history.
///
/// `messages[0]` is always the system instruction. It is never truncated and only
/// changes through [`Session::set_role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionFields")]
pub struct Session {
    id: String,
    messages: Vec<Message>,
    limit: usize,
    attributes: BTreeSet<String>,
}

#[derive(Deserialize)]
struct SessionFields {
    id: String,
    messages: Vec<Message>,
    limit: usize,
    #[serde(default)]
    attributes: BTreeSet<String>,
}

impl TryFrom<SessionFields> for Session {
    type Error = String;

    fn try_from(fields: SessionFields) -> Result<Self, Self::Error> {
        match fields.messages.first() {
            Some(first) if first.role == Role::System => {}
            Some(first) => {
                return Err(format!(
                    "session '{}' starts with a {} message instead of the system instruction",
                    fields.id, first.role
                ));
            }
            None => return Err(format!("session '{}' has no system instruction", fields.id)),
        }

        Ok(Self {
            id: fields.id,
            messages: fields.messages,
            limit: fields.limit,
            attributes: fields.attributes,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_ID, DEFAULT_MESSAGE_LIMIT, DEFAULT_ROLE)
    }
}

impl Session {
    /// Creates a session whose system instruction is `You are {role}.`
    pub fn new(id: impl Into<String>, limit: usize, role: &str) -> Self {
        Self {
            id: id.into(),
            messages: vec![Message::system(role_instruction(role))],
            limit,
            attributes: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }

    pub const fn attributes(&self) -> &BTreeSet<String> {
        &self.attributes
    }

    /// Content of the system message.
    pub fn role_instruction(&self) -> &str {
        self.messages
            .first()
            .map_or("", |message| message.content.as_str())
    }

    /// Sends `prompt` with the current history and records the reply.
    ///
    /// The user message stays in the history even when the request fails; only
    /// a successful reply appends an assistant message.
    pub async fn ask(&mut self, executor: &RequestExecutor, prompt: &str) -> Completion<String> {
        self.messages.push(Message::user(prompt));
        self.truncate_history();

        executor.chat(&self.messages).await.map(|reply| {
            let text = reply.content.clone();
            self.messages.push(reply);
            text
        })
    }

    /// Replaces the system instruction and drops all history.
    pub fn set_role(&mut self, role: &str) {
        self.clear_history();
        self.messages[0].content = role_instruction(role);
    }

    pub fn clear_history(&mut self) {
        self.messages.truncate(1);
    }

    /// Takes effect on the next [`Session::ask`].
    pub const fn set_message_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    pub fn configure(&mut self, name: &str) {
        self.attributes.insert(name.to_string());
    }

    pub fn deconfigure(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    pub fn is_configured(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    fn truncate_history(&mut self) {
        let length = self.messages.len() - 1;
        if length > self.limit {
            self.messages.drain(1..=length - self.limit);
        }
    }
}

fn role_instruction(role: &str) -> String {
    format!("You are {role}.")
}
