#[cfg(test)]
#[path = "account_test.rs"]
mod tests;

use chrono::Local;
use chrono::SecondsFormat;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
}

/// The durable representation of a signed-in teacher. Mirrored to the
/// account entry in local storage whenever it is created or upgraded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_premium: bool,
    pub created_at: String,
}

impl Account {
    /// When no name is supplied, the local part of the email address is used
    /// as the display name.
    pub fn new(email: &str, name: Option<&str>) -> Account {
        let display_name = match name {
            Some(name) => name.to_string(),
            None => email.split('@').next().unwrap_or(email).to_string(),
        };

        return Account {
            // Millisecond timestamps can collide under rapid creation. That
            // matches the upstream behavior this tool simulates.
            id: Utc::now().timestamp_millis().to_string(),
            email: email.to_string(),
            name: display_name,
            role: Role::Teacher,
            is_premium: false,
            created_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        };
    }
}

/// The full in-memory authentication status handed to subscribers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub account: Option<Account>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

/// Validation outcomes from login and signup. Rejections are ordinary
/// values; only storage faults travel on the error channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Granted,
    Denied { reason: String },
}

impl AuthOutcome {
    pub fn denied(reason: &str) -> AuthOutcome {
        return AuthOutcome::Denied {
            reason: reason.to_string(),
        };
    }

    pub fn is_granted(&self) -> bool {
        return *self == AuthOutcome::Granted;
    }
}
