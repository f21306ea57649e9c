// End-to-end background fetch: saved session on disk, file-backed
// preferences, real HTTP client against a mock server.

use std::cell::Cell;

use httpmock::prelude::*;
use badgesync_api_client::{save_auth, AuthCredentials, SavedAuth};
use badgesync_badge::testing::{FakeApplication, FakeNotificationCenter};
use badgesync_badge::{
    Application, AuthorizationStatus, BackgroundFetchResult, BadgeNotifications, HttpClientFactory,
};
use badgesync_config::{FileStore, PreferenceStore};

fn fetch_once<S, A, C>(
    c: &BadgeNotifications<S, A, C, SavedAuth, HttpClientFactory>,
) -> Option<BackgroundFetchResult>
where
    S: PreferenceStore,
    A: Application,
{
    let seen = Cell::new(None);
    smol::block_on(c.fetch(|r| seen.set(Some(r))));
    seen.get()
}

fn controller(
    dir: &std::path::Path,
) -> BadgeNotifications<FileStore, FakeApplication, FakeNotificationCenter, SavedAuth, HttpClientFactory> {
    BadgeNotifications::new(
        FileStore::in_dir(dir),
        FakeApplication::with_badge(0),
        FakeNotificationCenter::new(AuthorizationStatus::Authorized),
        SavedAuth::new(dir),
        HttpClientFactory,
    )
}

#[test]
fn fetch_applies_unread_count() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/notifications")
            .query_param("all", "false")
            .header("authorization", "Bearer tok_live");
        then.status(200).json_body(serde_json::json!([{"id": "1"}, {"id": "2"}]));
    });

    let dir = tempfile::tempdir().unwrap();
    save_auth(dir.path(), &AuthCredentials::new("tok_live".into(), server.base_url())).unwrap();
    let c = controller(dir.path());
    c.set_enabled(true);

    assert_eq!(fetch_once(&c), Some(BackgroundFetchResult::NewData));
    assert_eq!(c.application().badge_number(), 2);
    assert_eq!(fetch_once(&c), Some(BackgroundFetchResult::NoData));
    mock.assert_hits(2);
}

#[test]
fn server_error_reports_failed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/notifications");
        then.status(502).body("bad gateway");
    });

    let dir = tempfile::tempdir().unwrap();
    save_auth(dir.path(), &AuthCredentials::new("tok".into(), server.base_url())).unwrap();
    let c = controller(dir.path());
    c.set_enabled(true);

    assert_eq!(fetch_once(&c), Some(BackgroundFetchResult::Failed));
    assert_eq!(c.application().badge_number(), 0);
}

#[test]
fn no_saved_session_skips_handler() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.path("/notifications");
        then.status(200).json_body(serde_json::json!([]));
    });

    let dir = tempfile::tempdir().unwrap();
    let c = controller(dir.path());
    c.set_enabled(true);

    assert_eq!(fetch_once(&c), None);
    mock.assert_hits(0);
}
