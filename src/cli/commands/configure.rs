//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::validator::Validation;
use inquire::{CustomType, CustomUserError, Select, Text};

use crate::config::{ConfigFile, ConfigManager, TexlateConfig};
use crate::translation::DEFAULT_BATCH_SIZE;
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command to edit default settings.
///
/// Lets the user pick the default provider, model, and batch size. Other
/// `[texlate]` settings are preserved.
pub fn run_configure() -> Result<()> {
    handle_prompt_cancellation(run_configure_inner)
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new();
    let mut config = manager.load_or_default()?;

    if config.providers.is_empty() {
        bail!(
            "No providers configured.\n\n\
             Add a [providers.<name>] table to {} first.",
            manager.config_path().display()
        );
    }

    print_current_defaults(&config);

    let provider_names: Vec<String> = config.providers.keys().cloned().collect();
    let provider = select_provider(&provider_names, config.texlate.provider.as_deref())?;

    let available_models = config
        .providers
        .get(&provider)
        .map(|p| p.models.clone())
        .unwrap_or_default();
    let model = select_model(&available_models, config.texlate.model.as_deref())?;

    let batch_size = CustomType::<usize>::new("Batch size:")
        .with_default(config.texlate.batch_size.unwrap_or(DEFAULT_BATCH_SIZE))
        .with_help_message("Segments translated concurrently per batch")
        .with_validator(|size: &usize| -> Result<Validation, CustomUserError> {
            if *size == 0 {
                Ok(Validation::Invalid("Batch size must be at least 1".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()?;

    config.texlate = TexlateConfig {
        provider: Some(provider),
        model: Some(model),
        batch_size: Some(batch_size),
        ..config.texlate
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_current_defaults(config: &ConfigFile) {
    let not_set = || Style::secondary("(not set)");
    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}    {}",
        Style::label("provider"),
        config
            .texlate
            .provider
            .as_deref()
            .map_or_else(not_set, Style::value)
    );
    println!(
        "  {}       {}",
        Style::label("model"),
        config
            .texlate
            .model
            .as_deref()
            .map_or_else(not_set, Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("batch_size"),
        config
            .texlate
            .batch_size
            .map_or_else(not_set, Style::value)
    );
    println!();
}

fn select_provider(providers: &[String], default: Option<&str>) -> Result<String> {
    let default_index = default
        .and_then(|d| providers.iter().position(|p| p == d))
        .unwrap_or(0);

    let selection = Select::new("Default provider:", providers.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_model(available_models: &[String], default: Option<&str>) -> Result<String> {
    if available_models.is_empty() {
        let mut prompt = Text::new("Default model:").with_help_message("Enter the model name");

        if let Some(d) = default {
            prompt = prompt.with_default(d);
        }

        let model = prompt.prompt()?;

        if model.trim().is_empty() {
            bail!("Model name cannot be empty");
        }

        Ok(model.trim().to_string())
    } else {
        let default_index = default
            .and_then(|d| available_models.iter().position(|m| m == d))
            .unwrap_or(0);

        let selection = Select::new("Default model:", available_models.to_vec())
            .with_starting_cursor(default_index)
            .prompt()?;

        Ok(selection)
    }
}
