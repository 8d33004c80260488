//! Session lifecycle: load, validate, refresh, and fall back to login.
//!
//! `SessionManager::ensure_session` produces a usable access token for
//! every authenticated command. Tokens obtained from the server are saved
//! to the `TokenStore` before they are handed to the caller.

use std::io;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::api::{ApiClient, ApiError};

use super::tokens::{TokenStore, TokenStoreError, Tokens};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("failed to send OTP")]
    OtpSend(#[source] ApiError),

    #[error("failed to verify OTP")]
    OtpVerify(#[source] ApiError),

    #[error("failed to read input")]
    Prompt(#[from] io::Error),

    #[error(transparent)]
    Store(#[from] TokenStoreError),
}

/// Where a stored record stands relative to the current time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    Valid,
    Expired,
    RefreshFailed,
}

/// Progress notices emitted while establishing a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    NotLoggedIn,
    RefreshFailed(String),
    SendingCode,
    LoggedIn,
}

/// Interactive input needed by the login flow.
pub trait Prompter {
    /// Ask the user for their email address
    fn email(&mut self) -> io::Result<String>;

    /// Ask the user for the code that was emailed to them
    fn code(&mut self) -> io::Result<String>;

    fn notify(&mut self, _event: &SessionEvent) {}
}

/// Source of the current Unix time in seconds
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

#[derive(Clone)]
pub struct SessionManager {
    api: ApiClient,
    store: TokenStore,
    clock: Clock,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: TokenStore) -> Self {
        Self {
            api,
            store,
            clock: Arc::new(|| Utc::now().timestamp()),
        }
    }

    /// Replace the system clock
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    fn now(&self) -> i64 {
        (self.clock)()
    }

    /// Classify a loaded record. A token is expired at its expiry second.
    pub fn state(tokens: Option<&Tokens>, now: i64) -> SessionState {
        match tokens {
            None => SessionState::NoSession,
            Some(t) if t.is_expired_at(now) => SessionState::Expired,
            Some(_) => SessionState::Valid,
        }
    }

    /// Return tokens that are valid now, refreshing or logging in as needed.
    ///
    /// An expired record is refreshed once; if the refresh fails for any
    /// reason the user is asked to log in again.
    pub async fn ensure_session(&self, prompter: &mut dyn Prompter) -> Result<Tokens, AuthError> {
        let loaded = self.load_existing()?;
        let state = Self::state(loaded.as_ref(), self.now());
        debug!(?state, "Loaded session");

        match (state, loaded) {
            (SessionState::Valid, Some(tokens)) => Ok(tokens),
            (SessionState::Expired, Some(tokens)) => self.refresh_or_login(&tokens, prompter).await,
            _ => {
                prompter.notify(&SessionEvent::NotLoggedIn);
                self.login(prompter).await
            }
        }
    }

    /// Run the interactive one-time-code login and persist the result
    pub async fn login(&self, prompter: &mut dyn Prompter) -> Result<Tokens, AuthError> {
        let email = prompter.email()?.trim().to_string();

        prompter.notify(&SessionEvent::SendingCode);
        self.api
            .send_otp(&email)
            .await
            .map_err(AuthError::OtpSend)?;

        let code = prompter.code()?.trim().to_string();
        let grant = self
            .api
            .verify_otp(&email, &code)
            .await
            .map_err(AuthError::OtpVerify)?;

        let tokens = Tokens::from_grant(grant, self.now());
        self.store.save(&tokens)?;
        debug!(expires_at = tokens.expires_at, "Logged in");

        prompter.notify(&SessionEvent::LoggedIn);
        Ok(tokens)
    }

    async fn refresh_or_login(
        &self,
        tokens: &Tokens,
        prompter: &mut dyn Prompter,
    ) -> Result<Tokens, AuthError> {
        match self.api.refresh_tokens(&tokens.refresh_token).await {
            Ok(grant) => {
                let refreshed = Tokens::from_grant(grant, self.now());
                self.store.save(&refreshed)?;
                debug!(expires_at = refreshed.expires_at, "Refreshed tokens");
                Ok(refreshed)
            }
            Err(e) => {
                debug!(state = ?SessionState::RefreshFailed, error = %e, "Token refresh failed");
                let reason = format!("{:#}", anyhow::Error::new(e));
                prompter.notify(&SessionEvent::RefreshFailed(reason));
                self.login(prompter).await
            }
        }
    }

    /// Load the stored record. A missing or unreadable record means no session.
    fn load_existing(&self) -> Result<Option<Tokens>, AuthError> {
        match self.store.load() {
            Ok(tokens) => Ok(Some(tokens)),
            Err(TokenStoreError::NotFound(_)) => Ok(None),
            Err(e @ TokenStoreError::Corrupt { .. }) => {
                debug!(error = %e, "Ignoring corrupt token file");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(expires_at: i64) -> Tokens {
        Tokens {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at,
        }
    }

    #[test]
    fn test_state_without_record() {
        assert_eq!(SessionManager::state(None, 100), SessionState::NoSession);
    }

    #[test]
    fn test_state_expiry_boundary() {
        let t = tokens(1_000);
        assert_eq!(SessionManager::state(Some(&t), 999), SessionState::Valid);
        assert_eq!(SessionManager::state(Some(&t), 1_000), SessionState::Expired);
        assert_eq!(SessionManager::state(Some(&t), 1_001), SessionState::Expired);
    }
}
