#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::time;

use super::AccountStore;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Account;
use crate::domain::models::AuthOutcome;
use crate::domain::models::AuthState;

const DENIED_LOGIN: &str = "Invalid credentials";
const DENIED_SIGNUP: &str = "Please fill all fields correctly";

type Handler = Box<dyn FnMut(&AuthState) + Send>;

/// Capability returned from subscribe. Hand it back to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionToken(u64);

/// Single authoritative holder of the authentication state. Constructed
/// once at startup, hydrated from durable storage, and passed by handle to
/// every consumer. All mutation goes through the operations below; each one
/// mirrors to storage first, then fans the new state out to subscribers in
/// insertion order before returning.
pub struct SessionStore {
    state: AuthState,
    accounts: AccountStore,
    subscribers: Vec<(SubscriptionToken, Handler)>,
    next_token: u64,
    auth_delay: Duration,
}

impl SessionStore {
    pub fn new(accounts: AccountStore) -> Result<SessionStore> {
        let account = accounts.load()?;
        let state = AuthState {
            is_authenticated: account.is_some(),
            account,
            is_loading: false,
        };

        let delay_ms = Config::get(ConfigKey::AuthDelayMs).parse::<u64>().unwrap_or(1000);

        return Ok(SessionStore {
            state,
            accounts,
            subscribers: vec![],
            next_token: 0,
            auth_delay: Duration::from_millis(delay_ms),
        });
    }

    /// Registers a handler invoked with the full state on every subsequent
    /// change. Notification order follows registration order.
    pub fn subscribe(&mut self, handler: impl FnMut(&AuthState) + Send + 'static) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token);
        self.next_token += 1;
        self.subscribers.push((token, Box::new(handler)));

        return token;
    }

    pub fn unsubscribe(&mut self, token: SubscriptionToken) {
        self.subscribers.retain(|(t, _)| return *t != token);
    }

    /// A snapshot by value. Mutating it does not touch the store.
    pub fn state(&self) -> AuthState {
        return self.state.clone();
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthOutcome> {
        self.begin_loading();
        time::sleep(self.auth_delay).await;

        if email.is_empty() || password.len() < 6 {
            return Ok(self.deny(DENIED_LOGIN));
        }

        self.complete_sign_in(Account::new(email, None))?;
        return Ok(AuthOutcome::Granted);
    }

    pub async fn signup(&mut self, email: &str, password: &str, name: &str) -> Result<AuthOutcome> {
        self.begin_loading();
        time::sleep(self.auth_delay).await;

        if email.is_empty() || password.len() < 6 || name.is_empty() {
            return Ok(self.deny(DENIED_SIGNUP));
        }

        self.complete_sign_in(Account::new(email, Some(name)))?;
        return Ok(AuthOutcome::Granted);
    }

    /// Clears the session and its durable copy. Idempotent.
    pub fn logout(&mut self) -> Result<()> {
        self.accounts.delete()?;
        self.state = AuthState::default();
        self.notify();

        tracing::info!("Signed out");
        return Ok(());
    }

    /// Marks the signed-in account premium and re-persists it. Applying it
    /// again is a no-op, as is calling it signed out.
    pub fn upgrade_to_premium(&mut self) -> Result<()> {
        let snapshot = match self.state.account.as_mut() {
            Some(account) => {
                account.is_premium = true;
                account.clone()
            }
            None => {
                tracing::debug!("Premium upgrade requested with no signed-in account");
                return Ok(());
            }
        };

        self.accounts.save(&snapshot)?;
        self.notify();

        tracing::info!(email = snapshot.email, "Upgraded to premium");
        return Ok(());
    }

    fn begin_loading(&mut self) {
        self.state.is_loading = true;
        self.notify();
    }

    fn deny(&mut self, reason: &str) -> AuthOutcome {
        self.state.is_loading = false;
        self.notify();

        tracing::debug!(reason, "Credentials rejected");
        return AuthOutcome::denied(reason);
    }

    fn complete_sign_in(&mut self, account: Account) -> Result<()> {
        self.accounts.save(&account)?;
        self.state = AuthState {
            account: Some(account),
            is_authenticated: true,
            is_loading: false,
        };
        self.notify();

        tracing::info!("Signed in");
        return Ok(());
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, handler) in self.subscribers.iter_mut() {
            handler(state);
        }
    }
}
