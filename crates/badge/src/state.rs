use serde::Serialize;

use crate::platform::AuthorizationStatus;

/// What the badge settings screen should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeState {
    /// Permission never requested
    Initial,
    /// Permission refused at the platform level
    Denied,
    /// Permitted, but the user turned badge sync off
    Disabled,
    Enabled,
}

impl BadgeState {
    /// Combine platform permission with the user preference.
    pub fn resolve(status: AuthorizationStatus, user_enabled: bool) -> Self {
        match status {
            AuthorizationStatus::NotDetermined => BadgeState::Initial,
            AuthorizationStatus::Denied => BadgeState::Denied,
            AuthorizationStatus::Provisional | AuthorizationStatus::Authorized => {
                if user_enabled {
                    BadgeState::Enabled
                } else {
                    BadgeState::Disabled
                }
            }
        }
    }
}

impl std::fmt::Display for BadgeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeState::Initial => write!(f, "initial"),
            BadgeState::Denied => write!(f, "denied"),
            BadgeState::Disabled => write!(f, "disabled"),
            BadgeState::Enabled => write!(f, "enabled"),
        }
    }
}
