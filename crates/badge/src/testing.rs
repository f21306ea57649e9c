//! Test doubles for the platform seams.
//!
//! Everything here is single-threaded (`Cell`/`RefCell`) and answers
//! immediately unless told otherwise. Use with `smol::block_on`.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use badgesync_api_client::{ApiError, AuthCredentials, Notification};

use crate::platform::{
    Application, AuthorizationOptions, AuthorizationStatus, BackgroundFetchInterval,
    ClientFactory, NotificationCenter, NotificationsApi, SessionProvider,
};

// ============================================================================
// Application
// ============================================================================

#[derive(Debug, Default)]
pub struct FakeApplication {
    badge: Cell<i64>,
    interval: Cell<Option<BackgroundFetchInterval>>,
    badge_writes: Cell<usize>,
}

impl FakeApplication {
    pub fn with_badge(badge: i64) -> Self {
        Self { badge: Cell::new(badge), ..Self::default() }
    }

    /// Last interval set, if any.
    pub fn interval(&self) -> Option<BackgroundFetchInterval> {
        self.interval.get()
    }

    pub fn badge_writes(&self) -> usize {
        self.badge_writes.get()
    }
}

impl Application for FakeApplication {
    fn badge_number(&self) -> i64 {
        self.badge.get()
    }

    fn set_badge_number(&self, value: i64) {
        self.badge.set(value);
        self.badge_writes.set(self.badge_writes.get() + 1);
    }

    fn set_minimum_background_fetch_interval(&self, interval: BackgroundFetchInterval) {
        self.interval.set(Some(interval));
    }
}

// ============================================================================
// Notification center
// ============================================================================

#[derive(Debug)]
pub struct FakeNotificationCenter {
    status: Cell<AuthorizationStatus>,
    grant: Cell<bool>,
    unresponsive: Cell<bool>,
    requests: RefCell<Vec<AuthorizationOptions>>,
}

impl FakeNotificationCenter {
    pub fn new(status: AuthorizationStatus) -> Self {
        Self {
            status: Cell::new(status),
            grant: Cell::new(true),
            unresponsive: Cell::new(false),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Answer to the next permission request.
    pub fn set_grant(&self, grant: bool) {
        self.grant.set(grant);
    }

    pub fn set_status(&self, status: AuthorizationStatus) {
        self.status.set(status);
    }

    /// Never answer any query.
    pub fn set_unresponsive(&self, unresponsive: bool) {
        self.unresponsive.set(unresponsive);
    }

    pub fn requests(&self) -> Vec<AuthorizationOptions> {
        self.requests.borrow().clone()
    }
}

impl NotificationCenter for FakeNotificationCenter {
    fn authorization_status(&self) -> impl Future<Output = AuthorizationStatus> {
        let status = self.status.get();
        let unresponsive = self.unresponsive.get();
        async move {
            if unresponsive {
                std::future::pending::<()>().await;
            }
            status
        }
    }

    fn request_authorization(&self, options: AuthorizationOptions) -> impl Future<Output = bool> {
        self.requests.borrow_mut().push(options);
        let grant = self.grant.get();
        let unresponsive = self.unresponsive.get();
        async move {
            if unresponsive {
                std::future::pending::<()>().await;
            }
            grant
        }
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[derive(Debug, Default)]
pub struct FakeSessions {
    session: RefCell<Option<AuthCredentials>>,
}

impl FakeSessions {
    pub fn logged_in(token: &str) -> Self {
        let creds = AuthCredentials::new(token.to_string(), "https://api.test".to_string());
        Self { session: RefCell::new(Some(creds)) }
    }

    pub fn logged_out() -> Self {
        Self::default()
    }
}

impl SessionProvider for FakeSessions {
    fn focused_session(&self) -> Option<AuthCredentials> {
        self.session.borrow().clone()
    }
}

// ============================================================================
// Notifications API
// ============================================================================

#[derive(Debug)]
struct FakeApiState {
    response: Result<usize, ApiError>,
    /// (token, all) for every request sent
    requests: Vec<(String, bool)>,
    clients_built: usize,
}

/// Shared fake backend. Clones see the same state.
#[derive(Debug, Clone)]
pub struct FakeApi {
    state: Rc<RefCell<FakeApiState>>,
}

impl FakeApi {
    /// Every request returns `count` unread notifications.
    pub fn responding(count: usize) -> Self {
        Self::with_response(Ok(count))
    }

    pub fn failing(err: ApiError) -> Self {
        Self::with_response(Err(err))
    }

    fn with_response(response: Result<usize, ApiError>) -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeApiState {
                response,
                requests: Vec::new(),
                clients_built: 0,
            })),
        }
    }

    pub fn set_count(&self, count: usize) {
        self.state.borrow_mut().response = Ok(count);
    }

    pub fn requests(&self) -> Vec<(String, bool)> {
        self.state.borrow().requests.clone()
    }

    pub fn clients_built(&self) -> usize {
        self.state.borrow().clients_built
    }
}

pub struct FakeClient {
    token: String,
    state: Rc<RefCell<FakeApiState>>,
}

impl ClientFactory for FakeApi {
    type Client = FakeClient;

    fn client(&self, session: &AuthCredentials) -> FakeClient {
        self.state.borrow_mut().clients_built += 1;
        FakeClient { token: session.token.clone(), state: Rc::clone(&self.state) }
    }
}

impl NotificationsApi for FakeClient {
    fn notifications(&self, all: bool) -> impl Future<Output = Result<Vec<Notification>, ApiError>> {
        let response = {
            let mut state = self.state.borrow_mut();
            state.requests.push((self.token.clone(), all));
            state.response.clone()
        };
        std::future::ready(response.map(fake_notifications))
    }
}

fn fake_notifications(count: usize) -> Vec<Notification> {
    (0..count)
        .map(|i| Notification {
            id: (i + 1).to_string(),
            unread: true,
            reason: None,
            updated_at: None,
            subject: None,
        })
        .collect()
}
