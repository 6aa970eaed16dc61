use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::llm::{DEFAULT_RETRY, MAX_RETRY, OpenAiClient, RequestExecutor};
use crate::paths;
use crate::session::{DEFAULT_MESSAGE_LIMIT, DEFAULT_ROLE};
use crate::translation::{BatchSettings, DEFAULT_BATCH_SIZE, DEFAULT_DELIMITER, Glossary};
use crate::ui::Style;

/// Chat model used when neither the CLI nor the config file names one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Model used for free-form completions when none is configured.
pub const DEFAULT_COMPLETION_MODEL: &str = "text-davinci-003";

/// Default settings in the `[texlate]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TexlateConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default chat model name.
    pub model: Option<String>,
    /// Model for free-form completions.
    pub completion_model: Option<String>,
    /// Segments translated concurrently per batch.
    pub batch_size: Option<usize>,
    /// Cap on in-flight requests across a whole run.
    pub max_concurrency: Option<usize>,
    /// Retries after a failed request.
    pub retry: Option<u32>,
    /// Segment separator.
    pub delimiter: Option<String>,
    /// Non-system messages kept by new stored sessions.
    pub message_limit: Option<usize>,
    /// Role given to new stored sessions.
    pub default_role: Option<String>,
}

/// Configuration for a model provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/texlate/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub texlate: TexlateConfig,
    /// Term table used in translation prompts.
    #[serde(default)]
    pub glossary: Glossary,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider_name: String,
    pub endpoint: String,
    pub model: String,
    pub completion_model: String,
    pub api_key: Option<String>,
    pub batch_size: usize,
    pub max_concurrency: Option<usize>,
    pub retry: u32,
    pub delimiter: String,
    pub message_limit: usize,
    pub default_role: String,
    pub glossary: Glossary,
}

impl ResolvedConfig {
    /// Builds a request executor for the resolved provider.
    pub fn executor(&self) -> RequestExecutor {
        let client = OpenAiClient::new(
            self.endpoint.clone(),
            self.api_key.clone(),
            self.model.clone(),
            self.completion_model.clone(),
        );
        RequestExecutor::new(Arc::new(client), self.retry)
    }

    pub fn batch_settings(&self) -> BatchSettings {
        BatchSettings {
            batch_size: self.batch_size,
            delimiter: self.delimiter.clone(),
            max_concurrency: self.max_concurrency,
            glossary: self.glossary.clone(),
        }
    }
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Provider name override.
    pub provider: Option<String>,
    /// Chat model override.
    pub model: Option<String>,
    /// Completion model override.
    pub completion_model: Option<String>,
    /// Batch size override.
    pub batch_size: Option<usize>,
    /// Concurrency cap override.
    pub max_concurrency: Option<usize>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take precedence
/// over built-in defaults.
///
/// # Errors
///
/// Returns an error if no provider is selected, the provider is unknown, its API
/// key is missing, or a numeric setting is zero.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let defaults = &config_file.texlate;

    let provider_name = options
        .provider
        .as_ref()
        .or(defaults.provider.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'provider'\n\n\
                 Please provide it via:\n  \
                 - CLI option: texlate --provider <name>\n  \
                 - Config file: ~/.config/texlate/config.toml"
            )
        })?;

    let provider_config = config_file.providers.get(&provider_name).ok_or_else(|| {
        if config_file.providers.is_empty() {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 No providers configured. Add providers to ~/.config/texlate/config.toml"
            )
        } else {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}\n\n\
                 Add providers to ~/.config/texlate/config.toml",
                config_file
                    .providers
                    .keys()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join("\n  - ")
            )
        }
    })?;

    let model = options
        .model
        .as_ref()
        .or(defaults.model.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        crate::warn!(
            "{} Model '{}' is not in the configured models list for '{}'\n\
             Configured models: {}\n\
             Proceeding anyway...\n",
            Style::warning("Warning:"),
            model,
            provider_name,
            provider_config.models.join(", ")
        );
    }

    let api_key = provider_config.get_api_key();
    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/texlate/config.toml"
        );
    }

    let batch_size = options
        .batch_size
        .or(defaults.batch_size)
        .unwrap_or(DEFAULT_BATCH_SIZE);
    if batch_size == 0 {
        bail!("Invalid configuration: 'batch_size' must be at least 1");
    }

    let max_concurrency = options.max_concurrency.or(defaults.max_concurrency);
    if max_concurrency == Some(0) {
        bail!("Invalid configuration: 'max_concurrency' must be at least 1");
    }

    let retry = defaults.retry.unwrap_or(DEFAULT_RETRY);
    if retry > MAX_RETRY {
        bail!("Invalid configuration: 'retry' must be at most {MAX_RETRY}");
    }

    Ok(ResolvedConfig {
        provider_name,
        endpoint: provider_config.endpoint.clone(),
        model,
        completion_model: options
            .completion_model
            .as_ref()
            .or(defaults.completion_model.as_ref())
            .cloned()
            .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
        api_key,
        batch_size,
        max_concurrency,
        retry,
        delimiter: defaults
            .delimiter
            .clone()
            .unwrap_or_else(|| DEFAULT_DELIMITER.to_string()),
        message_limit: defaults.message_limit.unwrap_or(DEFAULT_MESSAGE_LIMIT),
        default_role: defaults
            .default_role
            .clone()
            .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        glossary: config_file.glossary.clone(),
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/texlate/config.toml`
    /// or `~/.config/texlate/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self::with_path(paths::config_dir().join("config.toml"))
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
