//! Headless host.
//!
//! Stands in for the OS on machines without an app icon: the badge number,
//! the background fetch interval, and the notification permission all live
//! in `<config_dir>/host.json`.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use badgesync_badge::{
    Application, AuthorizationOptions, AuthorizationStatus, BackgroundFetchInterval,
    NotificationCenter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostState {
    pub badge: i64,
    pub background_fetch: Option<BackgroundFetchInterval>,
    pub authorization: AuthorizationStatus,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            badge: 0,
            background_fetch: None,
            authorization: AuthorizationStatus::NotDetermined,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalHost {
    path: PathBuf,
}

impl LocalHost {
    pub fn in_dir(dir: &Path) -> Self {
        Self { path: dir.join("host.json") }
    }

    /// Current state; defaults if the file is missing or unreadable.
    pub fn load(&self) -> HostState {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Write to temp, then rename over `host.json`.
    pub fn save(&self, state: &HostState) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }

    pub fn set_authorization(&self, status: AuthorizationStatus) -> std::io::Result<()> {
        let mut state = self.load();
        state.authorization = status;
        self.save(&state)
    }

    fn update(&self, f: impl FnOnce(&mut HostState)) {
        let mut state = self.load();
        f(&mut state);
        if let Err(e) = self.save(&state) {
            log::warn!("Error writing {}: {}", self.path.display(), e);
        }
    }
}

impl Application for LocalHost {
    fn badge_number(&self) -> i64 {
        self.load().badge
    }

    fn set_badge_number(&self, value: i64) {
        self.update(|s| s.badge = value);
    }

    fn set_minimum_background_fetch_interval(&self, interval: BackgroundFetchInterval) {
        self.update(|s| s.background_fetch = Some(interval));
    }
}

impl NotificationCenter for LocalHost {
    fn authorization_status(&self) -> impl Future<Output = AuthorizationStatus> {
        std::future::ready(self.load().authorization)
    }

    /// First request grants; after that the recorded answer stands.
    fn request_authorization(&self, options: AuthorizationOptions) -> impl Future<Output = bool> {
        let granted = match self.load().authorization {
            AuthorizationStatus::NotDetermined => {
                log::debug!("granting {:?} on first request", options);
                self.update(|s| s.authorization = AuthorizationStatus::Authorized);
                true
            }
            AuthorizationStatus::Denied => false,
            AuthorizationStatus::Provisional | AuthorizationStatus::Authorized => true,
        };
        std::future::ready(granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_host_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::in_dir(dir.path());
        assert_eq!(host.load(), HostState::default());
        assert_eq!(smol::block_on(host.authorization_status()), AuthorizationStatus::NotDetermined);
    }

    #[test]
    fn test_first_request_grants_and_sticks() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::in_dir(dir.path());
        assert!(smol::block_on(host.request_authorization(AuthorizationOptions::BADGE)));
        assert_eq!(host.load().authorization, AuthorizationStatus::Authorized);
    }

    #[test]
    fn test_denied_stays_denied() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::in_dir(dir.path());
        host.set_authorization(AuthorizationStatus::Denied).unwrap();
        assert!(!smol::block_on(host.request_authorization(AuthorizationOptions::BADGE)));
        assert_eq!(host.load().authorization, AuthorizationStatus::Denied);
    }

    #[test]
    fn test_badge_and_interval_persist() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::in_dir(dir.path());
        host.set_badge_number(8);
        host.set_minimum_background_fetch_interval(BackgroundFetchInterval::Never);

        let again = LocalHost::in_dir(dir.path());
        assert_eq!(again.badge_number(), 8);
        assert_eq!(again.load().background_fetch, Some(BackgroundFetchInterval::Never));
    }

    #[test]
    fn test_save_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::in_dir(dir.path());
        std::fs::write(dir.path().join("host.json"), "{ not json").unwrap();

        host.set_authorization(AuthorizationStatus::Denied).unwrap();
        host.set_badge_number(2);

        assert_eq!(host.load().authorization, AuthorizationStatus::Denied);
        assert_eq!(host.load().badge, 2);
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["host.json".to_string()]);
    }
}
