//! Core library for `pz`, the Paperzilla command-line client.
//!
//! - `config`: API base URL and token file location
//! - `api`: HTTP transport and typed endpoint methods
//! - `auth`: token persistence and the session lifecycle
//! - `models`: projects and feed types

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthError, Prompter, SessionManager, TokenStore, Tokens};
pub use config::Config;
