//! Network-backed implementations of the session and client seams.

use std::future::Future;

use badgesync_api_client::{ApiClient, ApiError, AuthCredentials, Notification, SavedAuth};

use crate::platform::{ClientFactory, NotificationsApi, SessionProvider};

impl SessionProvider for SavedAuth {
    fn focused_session(&self) -> Option<AuthCredentials> {
        self.load()
    }
}

/// Builds blocking API clients and runs their requests on smol's
/// blocking pool, so the awaiting task is never blocked.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpClientFactory;

pub struct HttpClient {
    inner: ApiClient,
}

impl ClientFactory for HttpClientFactory {
    type Client = HttpClient;

    fn client(&self, session: &AuthCredentials) -> HttpClient {
        HttpClient { inner: ApiClient::new(session) }
    }
}

impl NotificationsApi for HttpClient {
    fn notifications(&self, all: bool) -> impl Future<Output = Result<Vec<Notification>, ApiError>> {
        let client = self.inner.clone();
        smol::unblock(move || client.notifications(all))
    }
}
