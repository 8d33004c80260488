//! Authentication module for managing the user's session.
//!
//! This module provides:
//! - `TokenStore`: the persisted `Tokens` record (owner-only JSON file)
//! - `SessionManager`: one-time-code login, expiry checks, and refresh with
//!   fallback to login
//! - `Prompter`: the interactive input the login flow depends on

pub mod session;
pub mod tokens;

pub use session::{AuthError, Clock, Prompter, SessionEvent, SessionManager, SessionState};
pub use tokens::{TokenStore, TokenStoreError, Tokens};
