//! HTTP transport for the Paperzilla REST API.
//!
//! `ApiClient` issues one request at a time, attaches the bearer token when
//! one is given, and maps non-2xx responses to `ApiError`. Endpoint methods
//! live in the sibling `auth`, `projects` and `feed` modules.

use std::borrow::Cow;
use std::time::Duration;

use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::config::Config;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with every request
const USER_AGENT: &str = concat!("pz/", env!("CARGO_PKG_VERSION"));

/// API client for Paperzilla.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured API base URL
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::with_base_url(&config.api_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and return the raw response body.
    ///
    /// `query` pairs are appended only when non-empty, so a request without
    /// options carries no query string at all. An empty or absent
    /// `bearer_token` sends no Authorization header.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        bearer_token: Option<&str>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, params = query.len(), "Sending request");

        let mut request = self.client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = bearer_token.filter(|t| !t.is_empty()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(url = %url, status = status.as_u16(), bytes = bytes.len(), "Received response");

        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            Err(ApiError::from_status(status, &bytes))
        }
    }

    /// GET a path and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        bearer_token: Option<&str>,
    ) -> Result<T, ApiError> {
        let body = self
            .request::<()>(Method::GET, path, query, None, bearer_token)
            .await?;
        Self::decode(path, &body)
    }

    /// POST a JSON body to a path and decode the JSON response
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        bearer_token: Option<&str>,
    ) -> Result<T, ApiError> {
        let response = self
            .request(Method::POST, path, &[], Some(body), bearer_token)
            .await?;
        Self::decode(path, &response)
    }

    fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", path, e))
        })
    }

    /// Percent-encode a value for use as a single path segment
    pub(crate) fn segment(value: &str) -> Cow<'_, str> {
        urlencoding::encode(value)
    }
}
