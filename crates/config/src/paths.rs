//! Config directory resolution.
//!
//! Everything lives under `~/.config/badgesync/` unless
//! `BADGESYNC_CONFIG_DIR` points somewhere else.

use std::path::PathBuf;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "BADGESYNC_CONFIG_DIR";

/// Resolve the config directory: explicit override > env > platform default.
pub fn config_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("badgesync")
}
