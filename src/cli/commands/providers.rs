//! Provider listing command handler.

use anyhow::Result;

use crate::config::{ConfigFile, ConfigManager, DEFAULT_MODEL};
use crate::ui::Style;

/// Prints configured providers to stdout.
///
/// If `specific_provider` is provided, shows detailed information for that provider.
/// Otherwise, lists all configured providers with their endpoints and models.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new();
    let config = manager.load_or_default()?;

    if config.providers.is_empty() {
        println!("No providers configured.");
        println!(
            "Add providers to {}",
            Style::secondary(manager.config_path().display())
        );
        return Ok(());
    }

    match specific_provider {
        Some(name) => print_provider_details(&config, name),
        None => {
            print_provider_list(&config);
            Ok(())
        }
    }
}

fn print_provider_details(config: &ConfigFile, name: &str) -> Result<()> {
    let Some(provider) = config.providers.get(name) else {
        anyhow::bail!("Provider '{name}' not found");
    };

    let is_default = config.texlate.provider.as_deref() == Some(name);
    println!(
        "{} {}{}",
        Style::header("Provider:"),
        Style::value(name),
        if is_default {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        }
    );
    println!("  {} = {}", Style::label("endpoint"), provider.endpoint);
    if provider.requires_api_key() {
        let state = if provider.get_api_key().is_some() {
            Style::success("(set)")
        } else {
            Style::error("(not set)")
        };
        println!("  {}  = {state}", Style::label("api_key"));
    }
    if provider.models.is_empty() {
        println!(
            "  {}   = {}",
            Style::label("models"),
            Style::secondary(format!("(none configured, defaults to {DEFAULT_MODEL})"))
        );
    } else {
        println!("  {}:", Style::label("models"));
        for model in &provider.models {
            println!("    - {model}");
        }
    }
    Ok(())
}

fn print_provider_list(config: &ConfigFile) {
    let default_provider = config.texlate.provider.as_deref();

    println!("{}\n", Style::header("Configured providers:"));
    for (name, provider) in &config.providers {
        let marker = if default_provider == Some(name.as_str()) {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!("  {}{marker}", Style::value(name));
        println!("    {} {}", Style::label("endpoint:"), provider.endpoint);
        if !provider.models.is_empty() {
            println!(
                "    {} {}",
                Style::label("models:"),
                provider.models.join(", ")
            );
        }
    }
}
