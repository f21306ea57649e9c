// Configuration loading

pub mod paths;
pub mod settings;

pub use paths::{config_dir, CONFIG_DIR_ENV};
pub use settings::{BadgePreferences, FileStore, MemoryStore, PreferenceStore};
