//! Session storage.
//!
//! Reads/writes `<config_dir>/auth.json` (0600 on Unix).
//! A saved file means a logged-in session exists.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

/// API base used when none is given at login.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Authentication credentials stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCredentials {
    /// Bearer token for the notifications API
    pub token: String,
    /// API base URL (e.g., "https://api.github.com")
    pub api_base: String,
    /// Account login (for display)
    #[serde(default)]
    pub login: Option<String>,
}

impl AuthCredentials {
    pub fn new(token: String, api_base: String) -> Self {
        Self { token, api_base, login: None }
    }
}

/// Returns the path to the auth credentials file inside `config_dir`.
pub fn auth_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join("auth.json")
}

/// Load saved auth credentials from disk.
/// Returns None if no credentials are saved or if the file is invalid.
pub fn load_auth(config_dir: &Path) -> Option<AuthCredentials> {
    let contents = std::fs::read_to_string(auth_file_path(config_dir)).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save auth credentials to disk.
/// Creates the config directory if it doesn't exist.
/// Sets 0600 permissions on Unix.
pub fn save_auth(config_dir: &Path, creds: &AuthCredentials) -> Result<(), String> {
    let path = auth_file_path(config_dir);

    std::fs::create_dir_all(config_dir)
        .map_err(|e| format!("Failed to create config directory: {}", e))?;

    let contents = serde_json::to_string_pretty(creds)
        .map_err(|e| format!("Failed to serialize credentials: {}", e))?;

    std::fs::write(&path, &contents)
        .map_err(|e| format!("Failed to write auth file: {}", e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, permissions)
            .map_err(|e| format!("Failed to set file permissions: {}", e))?;
    }

    Ok(())
}

/// Delete saved auth credentials. Missing file is not an error.
pub fn delete_auth(config_dir: &Path) -> Result<(), String> {
    let path = auth_file_path(config_dir);
    if path.exists() {
        std::fs::remove_file(&path)
            .map_err(|e| format!("Failed to delete auth file: {}", e))?;
    }
    Ok(())
}

/// Handle on the saved session of one config directory.
#[derive(Debug, Clone)]
pub struct SavedAuth {
    config_dir: PathBuf,
}

impl SavedAuth {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self { config_dir: config_dir.into() }
    }

    /// Current logged-in session, if any.
    pub fn load(&self) -> Option<AuthCredentials> {
        load_auth(&self.config_dir)
    }
}
