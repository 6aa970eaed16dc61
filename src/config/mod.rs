//! Configuration file management and provider settings.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_COMPLETION_MODEL, DEFAULT_MODEL, ProviderConfig,
    ResolveOptions, ResolvedConfig, TexlateConfig, resolve_config,
};
