//! Platform seams.
//!
//! The controller never talks to the OS or the network directly. Each
//! facility it needs is a trait here so hosts (and tests) can plug in their
//! own implementation.

use std::future::Future;

use badgesync_api_client::{ApiError, AuthCredentials, Notification};
use serde::{Deserialize, Serialize};

/// Notification permission as recorded by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorizationStatus {
    /// User hasn't been asked yet
    NotDetermined,
    Denied,
    /// Quiet delivery granted without an explicit prompt
    Provisional,
    Authorized,
}

impl std::fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotDetermined => write!(f, "not-determined"),
            Self::Denied => write!(f, "denied"),
            Self::Provisional => write!(f, "provisional"),
            Self::Authorized => write!(f, "authorized"),
        }
    }
}

/// What to ask permission for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthorizationOptions {
    pub badge: bool,
}

impl AuthorizationOptions {
    pub const BADGE: Self = Self { badge: true };
}

/// How often the platform may wake the app for a background refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundFetchInterval {
    /// As often as the platform allows
    Minimum,
    Never,
}

impl std::fmt::Display for BackgroundFetchInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimum => write!(f, "minimum"),
            Self::Never => write!(f, "never"),
        }
    }
}

/// Outcome reported back to the platform after a background fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundFetchResult {
    NewData,
    NoData,
    Failed,
}

impl std::fmt::Display for BackgroundFetchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewData => write!(f, "new-data"),
            Self::NoData => write!(f, "no-data"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// The running application: icon badge and background fetch scheduling.
pub trait Application {
    fn badge_number(&self) -> i64;
    fn set_badge_number(&self, value: i64);
    fn set_minimum_background_fetch_interval(&self, interval: BackgroundFetchInterval);
}

/// Platform notification permission service.
///
/// Both queries complete exactly once. Neither is required to complete at
/// all: a platform that never answers leaves the future pending.
pub trait NotificationCenter {
    fn authorization_status(&self) -> impl Future<Output = AuthorizationStatus>;
    fn request_authorization(&self, options: AuthorizationOptions) -> impl Future<Output = bool>;
}

/// Source of the current logged-in session.
pub trait SessionProvider {
    fn focused_session(&self) -> Option<AuthCredentials>;
}

/// A client able to list notifications for one session.
pub trait NotificationsApi {
    fn notifications(&self, all: bool) -> impl Future<Output = Result<Vec<Notification>, ApiError>>;
}

/// Builds a session-scoped client.
pub trait ClientFactory {
    type Client: NotificationsApi;

    fn client(&self, session: &AuthCredentials) -> Self::Client;
}

impl<T: Application + ?Sized> Application for &T {
    fn badge_number(&self) -> i64 {
        (**self).badge_number()
    }
    fn set_badge_number(&self, value: i64) {
        (**self).set_badge_number(value)
    }
    fn set_minimum_background_fetch_interval(&self, interval: BackgroundFetchInterval) {
        (**self).set_minimum_background_fetch_interval(interval)
    }
}

impl<T: NotificationCenter + ?Sized> NotificationCenter for &T {
    fn authorization_status(&self) -> impl Future<Output = AuthorizationStatus> {
        (**self).authorization_status()
    }
    fn request_authorization(&self, options: AuthorizationOptions) -> impl Future<Output = bool> {
        (**self).request_authorization(options)
    }
}

impl<T: SessionProvider + ?Sized> SessionProvider for &T {
    fn focused_session(&self) -> Option<AuthCredentials> {
        (**self).focused_session()
    }
}

impl<T: ClientFactory + ?Sized> ClientFactory for &T {
    type Client = T::Client;

    fn client(&self, session: &AuthCredentials) -> Self::Client {
        (**self).client(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_name<T: Serialize>(value: T) -> String {
        serde_json::to_value(value).unwrap().as_str().unwrap().to_string()
    }

    #[test]
    fn test_display_matches_wire_names() {
        for status in [
            AuthorizationStatus::NotDetermined,
            AuthorizationStatus::Denied,
            AuthorizationStatus::Provisional,
            AuthorizationStatus::Authorized,
        ] {
            assert_eq!(status.to_string(), wire_name(status));
        }
        for interval in [BackgroundFetchInterval::Minimum, BackgroundFetchInterval::Never] {
            assert_eq!(interval.to_string(), wire_name(interval));
        }
        for result in [
            BackgroundFetchResult::NewData,
            BackgroundFetchResult::NoData,
            BackgroundFetchResult::Failed,
        ] {
            assert_eq!(result.to_string(), wire_name(result));
        }
    }
}
