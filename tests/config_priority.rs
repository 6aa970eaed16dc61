#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! These tests verify that CLI options take priority over config file settings.
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file defaults
//! 3. Built-in defaults

use std::collections::BTreeMap;
use texlate::config::{
    ConfigFile, DEFAULT_MODEL, ProviderConfig, ResolveOptions, TexlateConfig, resolve_config,
};
use texlate::translation::{DEFAULT_BATCH_SIZE, Glossary};

fn make_config_with_defaults() -> ConfigFile {
    let mut providers = BTreeMap::new();
    providers.insert(
        "test_provider".to_string(),
        ProviderConfig {
            endpoint: "http://test.local".to_string(),
            api_key: Some("test_key".to_string()),
            api_key_env: None,
            models: vec!["test_model".to_string()],
        },
    );

    ConfigFile {
        texlate: TexlateConfig {
            provider: Some("test_provider".to_string()),
            model: Some("config_model".to_string()),
            batch_size: Some(10),
            max_concurrency: Some(6),
            ..TexlateConfig::default()
        },
        glossary: Glossary::default(),
        providers,
    }
}

#[test]
fn test_config_file_values_apply_without_cli() {
    let config = make_config_with_defaults();

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.provider_name, "test_provider");
    assert_eq!(resolved.endpoint, "http://test.local");
    assert_eq!(resolved.api_key.as_deref(), Some("test_key"));
    assert_eq!(resolved.model, "config_model");
    assert_eq!(resolved.batch_size, 10);
    assert_eq!(resolved.max_concurrency, Some(6));
}

#[test]
fn test_builtin_defaults_fill_missing_values() {
    let mut config = make_config_with_defaults();
    config.texlate.model = None;
    config.texlate.batch_size = None;
    config.texlate.max_concurrency = None;

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.model, DEFAULT_MODEL);
    assert_eq!(resolved.batch_size, DEFAULT_BATCH_SIZE);
    assert!(resolved.max_concurrency.is_none());
}

#[test]
fn test_cli_model_overrides_config() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        model: Some("cli_model".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.model, "cli_model");
}

#[test]
fn test_cli_provider_overrides_config() {
    let mut config = make_config_with_defaults();
    config.providers.insert(
        "other_provider".to_string(),
        ProviderConfig {
            endpoint: "http://other.local".to_string(),
            api_key: Some("other_key".to_string()),
            api_key_env: None,
            models: vec![],
        },
    );

    let options = ResolveOptions {
        provider: Some("other_provider".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.provider_name, "other_provider");
    assert_eq!(resolved.endpoint, "http://other.local");
    assert_eq!(resolved.api_key.as_deref(), Some("other_key"));
}

#[test]
fn test_all_cli_options_override_config() {
    let mut config = make_config_with_defaults();
    config.providers.insert(
        "cli_provider".to_string(),
        ProviderConfig {
            endpoint: "http://cli.local".to_string(),
            api_key: None,
            api_key_env: None,
            models: vec!["cli_model".to_string()],
        },
    );

    let options = ResolveOptions {
        provider: Some("cli_provider".to_string()),
        model: Some("cli_model".to_string()),
        completion_model: Some("cli_completion_model".to_string()),
        batch_size: Some(3),
        max_concurrency: Some(2),
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.provider_name, "cli_provider");
    assert_eq!(resolved.model, "cli_model");
    assert_eq!(resolved.completion_model, "cli_completion_model");
    assert_eq!(resolved.batch_size, 3);
    assert_eq!(resolved.max_concurrency, Some(2));
    assert!(resolved.api_key.is_none());
}

#[test]
fn test_zero_values_are_rejected_from_either_source() {
    let mut config = make_config_with_defaults();
    config.texlate.batch_size = Some(0);
    assert!(resolve_config(&ResolveOptions::default(), &config).is_err());

    let config = make_config_with_defaults();
    let options = ResolveOptions {
        max_concurrency: Some(0),
        ..ResolveOptions::default()
    };
    assert!(resolve_config(&options, &config).is_err());
}

#[test]
fn test_glossary_comes_from_config_file() {
    let mut config = make_config_with_defaults();
    config.glossary.terms.insert("agent".to_string(), "智能体".to_string());

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();
    let settings = resolved.batch_settings();

    assert_eq!(settings.glossary.terms.get("agent").unwrap(), "智能体");
    assert_eq!(settings.batch_size, 10);
}

#[test]
fn test_retry_above_cap_is_rejected() {
    let mut config = make_config_with_defaults();
    config.texlate.retry = Some(u32::MAX);

    let err = resolve_config(&ResolveOptions::default(), &config).unwrap_err();

    assert!(err.to_string().contains("retry"));
}
