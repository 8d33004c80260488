//! User-facing commands.
//!
//! Every command except `login` first obtains a valid session through
//! `Context::authenticate`, which may refresh tokens or prompt for login.

pub mod feed;
pub mod login;
pub mod project;

use anyhow::Result;
use paperzilla_core::{ApiClient, Config, SessionManager, TokenStore, Tokens};

use crate::prompt::TerminalPrompter;

/// Shared clients for a single command invocation
pub struct Context {
    pub api: ApiClient,
    pub session: SessionManager,
}

impl Context {
    pub fn new(config: &Config) -> Result<Self> {
        let api = ApiClient::new(config)?;
        let store = TokenStore::new(config.tokens_path.clone());
        let session = SessionManager::new(api.clone(), store);
        Ok(Self { api, session })
    }

    /// Tokens valid for the rest of this command
    pub async fn authenticate(&self) -> Result<Tokens> {
        Ok(self.session.ensure_session(&mut TerminalPrompter).await?)
    }
}
