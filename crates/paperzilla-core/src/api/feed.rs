//! Feed endpoints.
//!
//! The feed is paginated; `FeedOptions` controls which query parameters are
//! sent. The server treats the presence of a parameter as meaningful, so
//! unset options are omitted entirely rather than sent as zero values.

use serde::{Deserialize, Serialize};

use crate::models::{FeedOptions, FeedPage};

use super::{ApiClient, ApiError};

const FEED_TOKEN_PATH: &str = "/api/feed/token";

/// Short-lived capability token for the unauthenticated Atom feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedToken {
    pub token: String,
}

impl ApiClient {
    /// Fetch one page of a project's feed
    pub async fn fetch_feed(
        &self,
        token: &str,
        project_id: &str,
        options: &FeedOptions,
    ) -> Result<FeedPage, ApiError> {
        let path = format!("/api/projects/{}/feed", Self::segment(project_id));
        self.get_json(&path, &options.query_pairs(), Some(token))
            .await
    }

    /// Obtain a feed token, decoupling the Atom URL from the bearer token's lifetime
    pub async fn fetch_feed_token(&self, token: &str) -> Result<FeedToken, ApiError> {
        self.get_json(FEED_TOKEN_PATH, &[], Some(token)).await
    }

    /// Build the subscription URL for a project's Atom feed
    pub fn atom_feed_url(&self, project_id: &str, feed_token: &str) -> String {
        format!(
            "{}/api/feed/atom/{}?token={}",
            self.base_url(),
            Self::segment(project_id),
            urlencoding::encode(feed_token)
        )
    }
}
