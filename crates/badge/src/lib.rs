//! Application badge sync.
//!
//! `BadgeNotifications` mirrors the unread notification count onto the app
//! icon badge. It owns the decision logic only; the OS (badge, permission,
//! background fetch), the session, and the network sit behind the traits in
//! [`platform`].

pub mod controller;
pub mod http;
pub mod platform;
pub mod state;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use controller::BadgeNotifications;
pub use http::{HttpClient, HttpClientFactory};
pub use platform::{
    Application, AuthorizationOptions, AuthorizationStatus, BackgroundFetchInterval,
    BackgroundFetchResult, ClientFactory, NotificationCenter, NotificationsApi, SessionProvider,
};
pub use state::BadgeState;
