use anyhow::{Context, Result};

use crate::chat::ChatRepl;
use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::session::SessionStore;

pub struct ChatOptions {
    pub session: String,
    pub role: Option<String>,
    pub limit: Option<usize>,
    pub provider: Option<String>,
    pub model: Option<String>,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let manager = ConfigManager::new();
    let config_file = manager.load_or_default()?;
    let resolve_options = ResolveOptions {
        provider: options.provider,
        model: options.model,
        ..ResolveOptions::default()
    };
    let resolved = resolve_config(&resolve_options, &config_file)?;

    let store = SessionStore::open_default(resolved.default_role.clone())
        .context("Failed to open the session store")?;
    let stored = store.contains(&options.session)?;
    let mut session = store
        .get(&options.session)
        .with_context(|| format!("Failed to load session '{}'", options.session))?;

    // A fresh record picks up the configured limit; stored sessions keep their own.
    if !stored {
        session.set_message_limit(resolved.message_limit);
    }
    if let Some(limit) = options.limit {
        session.set_message_limit(limit);
    }
    if let Some(role) = options.role.as_deref() {
        session.set_role(role);
    }

    let mut repl = ChatRepl::new(
        session,
        store,
        resolved.executor(),
        resolved.provider_name,
        resolved.model,
    );
    repl.run().await
}
