//! Badge sync controller.
//!
//! Keeps the application badge in step with the unread notification count,
//! gated by the user's preference and the platform notification permission.
//!
//! All methods expect to be driven from one execution context. The async
//! ones (and the future `configure` hands back) resume on whatever task
//! awaits them; nothing here spawns.

use std::future::Future;

use badgesync_config::PreferenceStore;

use crate::platform::{
    Application, AuthorizationOptions, BackgroundFetchInterval, BackgroundFetchResult,
    ClientFactory, NotificationCenter, NotificationsApi, SessionProvider,
};
use crate::state::BadgeState;

pub struct BadgeNotifications<S, A, C, P, F> {
    store: S,
    application: A,
    center: C,
    sessions: P,
    clients: F,
}

impl<S, A, C, P, F> BadgeNotifications<S, A, C, P, F> {
    pub fn new(store: S, application: A, center: C, sessions: P, clients: F) -> Self {
        Self { store, application, center, sessions, clients }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn application(&self) -> &A {
        &self.application
    }
}

// ── Preference and badge ────────────────────────────────────────────

impl<S: PreferenceStore, A: Application, C, P, F> BadgeNotifications<S, A, C, P, F> {
    /// Whether the user wants badge sync. `false` until first set.
    pub fn is_enabled(&self) -> bool {
        self.store.user_enabled()
    }

    /// Turn badge sync on or off.
    ///
    /// Disabling stashes the visible badge and clears it; enabling puts the
    /// stashed value back. Runs the stash/restore even if `value` equals the
    /// current preference. The flag itself is written last.
    pub fn set_enabled(&self, value: bool) {
        if value {
            let restored = self.store.count_when_disabled();
            log::debug!("badge sync enabled, restoring badge {}", restored);
            self.application.set_badge_number(restored);
        } else {
            let current = self.application.badge_number();
            log::debug!("badge sync disabled, stashing badge {}", current);
            self.store.set_count_when_disabled(current);
            self.application.set_badge_number(0);
        }
        self.store.set_user_enabled(value);
    }

    /// Show `count` on the badge (0 while disabled).
    ///
    /// Always writes the badge. Returns true iff the visible value changed.
    pub fn update(&self, count: i64) -> bool {
        let effective = if self.is_enabled() { count } else { 0 };
        let changed = self.application.badge_number() != effective;
        self.application.set_badge_number(effective);
        changed
    }
}

// ── Permission ──────────────────────────────────────────────────────

impl<S: PreferenceStore, A: Application, C: NotificationCenter, P, F> BadgeNotifications<S, A, C, P, F> {
    /// Resolve the combined permission/preference state.
    ///
    /// Pends for as long as the platform takes to report its permission;
    /// there is no timeout.
    pub async fn check(&self) -> BadgeState {
        let status = self.center.authorization_status().await;
        BadgeState::resolve(status, self.is_enabled())
    }

    /// Startup configuration.
    ///
    /// Enabled: schedule background fetch as often as allowed, then ask for
    /// badge permission. Disabled: switch background fetch off and return
    /// `None` without asking.
    ///
    /// Returns once the schedule is set and the request is issued; it does
    /// not wait for the platform to answer. The returned future hands the
    /// grant to `permission_handler` when the answer arrives. Dropping it
    /// discards the answer.
    pub fn configure<'a, H>(
        &'a self,
        permission_handler: Option<H>,
    ) -> Option<impl Future<Output = ()> + 'a>
    where
        H: FnOnce(bool) + 'a,
    {
        if !self.is_enabled() {
            self.application
                .set_minimum_background_fetch_interval(BackgroundFetchInterval::Never);
            return None;
        }

        self.application
            .set_minimum_background_fetch_interval(BackgroundFetchInterval::Minimum);
        let answer = self.center.request_authorization(AuthorizationOptions::BADGE);
        Some(async move {
            let granted = answer.await;
            log::debug!("badge permission granted: {}", granted);
            if let Some(handler) = permission_handler {
                handler(granted);
            }
        })
    }
}

// ── Background fetch ────────────────────────────────────────────────

impl<S, A, C, P, F> BadgeNotifications<S, A, C, P, F>
where
    S: PreferenceStore,
    A: Application,
    P: SessionProvider,
    F: ClientFactory,
{
    /// Background fetch entry point.
    ///
    /// Without a session, or with badge sync disabled, returns without
    /// calling `handler` at all. Otherwise calls it exactly once.
    pub async fn fetch<H>(&self, handler: H)
    where
        H: FnOnce(BackgroundFetchResult),
    {
        let Some(session) = self.sessions.focused_session() else {
            log::debug!("background fetch skipped: no session");
            return;
        };
        if !self.is_enabled() {
            log::debug!("background fetch skipped: badge sync disabled");
            return;
        }

        // Client lives until the request settles.
        let client = self.clients.client(&session);
        let result = match client.notifications(false).await {
            Ok(notifications) => {
                let count = i64::try_from(notifications.len()).unwrap_or(i64::MAX);
                if self.update(count) {
                    BackgroundFetchResult::NewData
                } else {
                    BackgroundFetchResult::NoData
                }
            }
            Err(e) => {
                log::warn!("background fetch failed: {}", e);
                BackgroundFetchResult::Failed
            }
        };
        drop(client);

        log::info!("background fetch: {}", result);
        handler(result);
    }
}
