//! Notifications API client.
//!
//! Owns the wire contract with the notifications API (GitHub v3 shape):
//! verify a token, list notifications. Also owns the saved session
//! (`auth.json`) that tells the rest of the app whether anyone is logged in.
//!
//! Blocking only. No retries.

mod auth;
mod client;

pub use auth::{
    AuthCredentials, SavedAuth, DEFAULT_API_BASE,
    auth_file_path, load_auth, save_auth, delete_auth,
};
pub use client::{ApiClient, ApiError, Notification, NotificationSubject, UserInfo};
