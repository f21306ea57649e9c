// Badge preferences
// Stored in ~/.config/badgesync/badge.json

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

/// The two persisted badge keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgePreferences {
    /// User wants the app badge to mirror unread notifications
    #[serde(rename = "user-enabled")]
    pub user_enabled: bool,

    /// Badge value that was showing when syncing was last disabled
    #[serde(rename = "count-when-disabled")]
    pub count_when_disabled: i64,
}

/// Persistent key-value access for badge preferences.
///
/// Reads never fail: a store that cannot produce a value yields the default.
/// Writes are fire-and-forget from the caller's point of view.
pub trait PreferenceStore {
    fn user_enabled(&self) -> bool;
    fn set_user_enabled(&self, value: bool);
    fn count_when_disabled(&self) -> i64;
    fn set_count_when_disabled(&self, value: i64);
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    fn user_enabled(&self) -> bool {
        (**self).user_enabled()
    }
    fn set_user_enabled(&self, value: bool) {
        (**self).set_user_enabled(value)
    }
    fn count_when_disabled(&self) -> i64 {
        (**self).count_when_disabled()
    }
    fn set_count_when_disabled(&self, value: i64) {
        (**self).set_count_when_disabled(value)
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// JSON file store. Every access goes to disk so that several processes
/// sharing the config directory agree on the current values.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub const FILE_NAME: &'static str = "badge.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/badge.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences from disk
    ///
    /// Returns defaults if the file doesn't exist or can't be parsed.
    /// A broken preferences file must not block startup.
    pub fn load(&self) -> BadgePreferences {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(prefs) => prefs,
                Err(e) => {
                    log::warn!("Error parsing {}: {}; using defaults", self.path.display(), e);
                    BadgePreferences::default()
                }
            },
            Err(_) => BadgePreferences::default(),
        }
    }

    /// Save preferences (write to temp, then rename over the real file).
    pub fn save(&self, prefs: &BadgePreferences) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(prefs)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)
    }

    fn update(&self, f: impl FnOnce(&mut BadgePreferences)) {
        let mut prefs = self.load();
        f(&mut prefs);
        if let Err(e) = self.save(&prefs) {
            log::warn!("Error writing {}: {}", self.path.display(), e);
        }
    }
}

impl PreferenceStore for FileStore {
    fn user_enabled(&self) -> bool {
        self.load().user_enabled
    }

    fn set_user_enabled(&self, value: bool) {
        self.update(|p| p.user_enabled = value);
    }

    fn count_when_disabled(&self) -> i64 {
        self.load().count_when_disabled
    }

    fn set_count_when_disabled(&self, value: i64) {
        self.update(|p| p.count_when_disabled = value);
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Process-local store, for tests and hosts that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    user_enabled: Cell<bool>,
    count_when_disabled: Cell<i64>,
}

impl MemoryStore {
    pub fn snapshot(&self) -> BadgePreferences {
        BadgePreferences {
            user_enabled: self.user_enabled.get(),
            count_when_disabled: self.count_when_disabled.get(),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn user_enabled(&self) -> bool {
        self.user_enabled.get()
    }

    fn set_user_enabled(&self, value: bool) {
        self.user_enabled.set(value);
    }

    fn count_when_disabled(&self) -> i64 {
        self.count_when_disabled.get()
    }

    fn set_count_when_disabled(&self, value: i64) {
        self.count_when_disabled.set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_on_disk() {
        let prefs = BadgePreferences { user_enabled: true, count_when_disabled: 7 };
        let json = serde_json::to_value(prefs).unwrap();
        assert_eq!(json["user-enabled"], true);
        assert_eq!(json["count-when-disabled"], 7);
    }

    #[test]
    fn test_missing_file_reads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());
        assert!(!store.user_enabled());
        assert_eq!(store.count_when_disabled(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_reads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.load(), BadgePreferences::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());
        fs::write(store.path(), r#"{"user-enabled": true}"#).unwrap();
        assert!(store.user_enabled());
        assert_eq!(store.count_when_disabled(), 0);
    }

    #[test]
    fn test_values_survive_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let store = FileStore::in_dir(&nested);
        store.set_count_when_disabled(12);
        store.set_user_enabled(true);

        let reopened = FileStore::in_dir(&nested);
        assert!(reopened.user_enabled());
        assert_eq!(reopened.count_when_disabled(), 12);
        assert!(!nested.join("badge.json.tmp").exists());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::default();
        assert_eq!(store.snapshot(), BadgePreferences::default());
        store.set_user_enabled(true);
        store.set_count_when_disabled(3);
        assert_eq!(
            store.snapshot(),
            BadgePreferences { user_enabled: true, count_when_disabled: 3 }
        );
    }
}
