// Wire-contract tests for the notifications client against a mock server.
// Run with: cargo test -p badgesync-api-client --test notifications

use httpmock::prelude::*;
use badgesync_api_client::{ApiClient, ApiError, AuthCredentials};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&AuthCredentials::new("tok_test".into(), server.base_url()))
}

#[test]
fn unread_request_sends_all_false_and_bearer() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/notifications")
            .query_param("all", "false")
            .header("authorization", "Bearer tok_test")
            .header("accept", "application/vnd.github+json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!([
                {"id": "1", "unread": true, "reason": "mention",
                 "subject": {"title": "Crash on launch", "type": "Issue"}},
                {"id": "2", "unread": true, "reason": "review_requested",
                 "subject": {"title": "Bump deps", "type": "PullRequest"}},
                {"id": "3", "unread": true, "reason": "subscribed"},
            ]));
    });

    let notifications = client_for(&server).notifications(false).unwrap();

    mock.assert();
    assert_eq!(notifications.len(), 3);
    assert_eq!(notifications[0].reason.as_deref(), Some("mention"));
}

#[test]
fn empty_inbox_is_zero() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/notifications");
        then.status(200).json_body(serde_json::json!([]));
    });

    assert!(client_for(&server).notifications(false).unwrap().is_empty());
}

#[test]
fn unauthorized_maps_to_http_401() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/notifications");
        then.status(401).body(r#"{"message":"Bad credentials"}"#);
    });

    match client_for(&server).notifications(false) {
        Err(ApiError::Http(401, body)) => assert!(body.contains("Bad credentials")),
        other => panic!("expected HTTP 401, got {:?}", other.map(|n| n.len())),
    }
}

#[test]
fn malformed_body_maps_to_parse_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/notifications");
        then.status(200).body(r#"{"not":"an array"}"#);
    });

    let err = client_for(&server).notifications(false).unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)), "got {:?}", err);
}

#[test]
fn verify_token_returns_login() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/user").header("authorization", "Bearer tok_test");
        then.status(200).json_body(serde_json::json!({"login": "octocat", "name": "Mona"}));
    });

    let user = client_for(&server).verify_token().unwrap();
    mock.assert();
    assert_eq!(user.login, "octocat");
    assert_eq!(user.name.as_deref(), Some("Mona"));
}

#[test]
fn unreachable_server_is_network_error() {
    // Port 9 (discard) on localhost is closed on CI runners.
    let client = ApiClient::new(&AuthCredentials::new("t".into(), "http://127.0.0.1:9".into()));
    let err = client.notifications(false).unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {:?}", err);
}
