//! REST API client module for the Paperzilla service.
//!
//! This module provides the `ApiClient` transport plus the typed endpoint
//! methods layered on it:
//! - `auth`: one-time-code login and token refresh
//! - `projects`: project listing and lookup
//! - `feed`: paginated paper feed and Atom feed tokens
//!
//! Authenticated endpoints take the bearer token as an argument; the client
//! itself holds no session state.

pub mod auth;
pub mod client;
pub mod error;
pub mod feed;
pub mod projects;

pub use auth::TokenGrant;
pub use client::ApiClient;
pub use error::ApiError;
pub use feed::FeedToken;
