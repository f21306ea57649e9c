//! Notifications HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). Callers that live on
//! an async executor move requests onto a blocking pool themselves.

use std::time::Duration;

use serde::Deserialize;

use crate::auth::AuthCredentials;

const USER_AGENT: &str = concat!("badgesync/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Notifications API client (blocking).
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    api_base: String,
    token: String,
}

/// Error type for API operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// JSON parsing error
    Parse(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Account info from `GET /user`
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One notification thread. Only the fields the badge needs are required.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(default = "default_unread")]
    pub unread: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub subject: Option<NotificationSubject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSubject {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

fn default_unread() -> bool {
    true
}

impl ApiClient {
    /// Create a client scoped to one session.
    pub fn new(creds: &AuthCredentials) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: creds.api_base.trim_end_matches('/').to_string(),
            token: creds.token.clone(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Verify the token and get the account it belongs to.
    pub fn verify_token(&self) -> Result<UserInfo, ApiError> {
        let url = format!("{}/user", self.api_base);
        let resp = self.get(&url, &[])?;
        resp.json::<UserInfo>().map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// List notification threads.
    ///
    /// `all = false` asks only for unread threads.
    pub fn notifications(&self, all: bool) -> Result<Vec<Notification>, ApiError> {
        let url = format!("{}/notifications", self.api_base);
        let all = if all { "true" } else { "false" };
        let resp = self.get(&url, &[("all", all)])?;
        let notifications = resp
            .json::<Vec<Notification>>()
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        log::debug!("GET {} returned {} notification(s)", url, notifications.len());
        Ok(notifications)
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<reqwest::blocking::Response, ApiError> {
        let response = self.http.get(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .query(query)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Http(status, body));
        }

        Ok(response)
    }
}
