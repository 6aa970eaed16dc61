//! XDG-style path utilities for configuration and data directories.
//!
//! XDG Base Directory conventions are preferred over OS-specific locations
//! so the layout is the same on every platform.

use std::path::PathBuf;

const APP_DIR: &str = "texlate";

/// Returns the configuration directory for texlate.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/texlate` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/texlate` otherwise
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| home_dir().join(".config").join(APP_DIR),
        |xdg| PathBuf::from(xdg).join(APP_DIR),
    )
}

/// Returns the data directory for texlate.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/texlate` if `XDG_DATA_HOME` is set
/// 2. `~/.local/share/texlate` otherwise
pub fn data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME").map_or_else(
        |_| home_dir().join(".local").join("share").join(APP_DIR),
        |xdg| PathBuf::from(xdg).join(APP_DIR),
    )
}

/// Directory holding one record per stored session.
pub fn sessions_dir() -> PathBuf {
    data_dir().join("sessions")
}

/// Returns the user's home directory, or the working directory if it is unknown.
fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
