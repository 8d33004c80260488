use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A curation project. Fields other than `id` and `name` may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub mode: Option<String>,
    pub visibility: Option<String>,
    pub interest_description: Option<String>,
    pub email_frequency: Option<String>,
    pub email_time: Option<String>,
    pub matching_state: Option<String>,
    pub max_candidates: Option<u32>,
    #[serde(rename = "max_papers_per_digests")]
    pub max_papers_per_digest: Option<u32>,
    pub created_at: Option<String>,
    pub activated_at: Option<String>,
    pub last_digest_sent_at: Option<String>,
}

impl Project {
    /// Interest description, if one has been written
    pub fn interest(&self) -> Option<&str> {
        self.interest_description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
