//! Feed models: a paginated page of personalized papers.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// How relevant a feed item is to the project.
/// Encoded on the wire as a number (related = 1, must-read = 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum RelevanceClass {
    #[default]
    Related,
    MustRead,
    Other(u8),
}

impl From<u8> for RelevanceClass {
    fn from(value: u8) -> Self {
        match value {
            1 => RelevanceClass::Related,
            2 => RelevanceClass::MustRead,
            n => RelevanceClass::Other(n),
        }
    }
}

impl From<RelevanceClass> for u8 {
    fn from(value: RelevanceClass) -> Self {
        match value {
            RelevanceClass::Related => 1,
            RelevanceClass::MustRead => 2,
            RelevanceClass::Other(n) => n,
        }
    }
}

/// Preprint server a paper was ingested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum PaperSource {
    Arxiv,
    Biorxiv,
    Medrxiv,
    Chinaxiv,
    Other(u8),
}

impl Default for PaperSource {
    fn default() -> Self {
        PaperSource::Other(0)
    }
}

impl From<u8> for PaperSource {
    fn from(value: u8) -> Self {
        match value {
            1 => PaperSource::Arxiv,
            2 => PaperSource::Biorxiv,
            3 => PaperSource::Medrxiv,
            4 => PaperSource::Chinaxiv,
            n => PaperSource::Other(n),
        }
    }
}

impl From<PaperSource> for u8 {
    fn from(value: PaperSource) -> Self {
        match value {
            PaperSource::Arxiv => 1,
            PaperSource::Biorxiv => 2,
            PaperSource::Medrxiv => 3,
            PaperSource::Chinaxiv => 4,
            PaperSource::Other(n) => n,
        }
    }
}

impl PaperSource {
    pub fn name(&self) -> &'static str {
        match self {
            PaperSource::Arxiv => "arxiv",
            PaperSource::Biorxiv => "biorxiv",
            PaperSource::Medrxiv => "medrxiv",
            PaperSource::Chinaxiv => "chinaxiv",
            PaperSource::Other(_) => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paper {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub authors: Vec<Author>,
    pub published_date: Option<String>,
    pub pdf_url: Option<String>,
    pub url: Option<String>,
    pub doi: Option<String>,
    #[serde(rename = "source_id", deserialize_with = "null_as_default")]
    pub source: PaperSource,
    pub source_paper_id: Option<String>,
    pub short_id: Option<String>,
    pub slug: Option<String>,
    /// Source-specific metadata, passed through untouched
    pub metadata: serde_json::Value,
}

impl Paper {
    /// First author's surname, with "et al." when there are co-authors
    pub fn author_label(&self) -> String {
        let Some(first) = self.authors.first() else {
            return "Unknown".to_string();
        };
        let surname = first
            .name
            .split_whitespace()
            .last()
            .unwrap_or("Unknown");
        if self.authors.len() > 1 {
            format!("{} et al.", surname)
        } else {
            surname.to_string()
        }
    }
}

/// A paper as it appears in a project's feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedItem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub short_id: Option<String>,
    pub slug: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub paper_title: String,
    pub summary: Option<String>,
    /// 0.0 - 1.0
    #[serde(deserialize_with = "null_as_default")]
    pub relevance_score: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub relevance_class: RelevanceClass,
    pub combined_score: Option<f64>,
    /// Matcher explanation, passed through untouched
    pub matching_details: serde_json::Value,
    pub personalized_note: Option<String>,
    #[serde(rename = "user_starred", deserialize_with = "null_as_default")]
    pub starred: bool,
    #[serde(rename = "user_clicked", deserialize_with = "null_as_default")]
    pub clicked: bool,
    pub ready_at: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub paper: Paper,
}

impl FeedItem {
    pub fn is_must_read(&self) -> bool {
        self.relevance_class == RelevanceClass::MustRead
    }

    /// Relevance score as a whole percentage
    pub fn relevance_percent(&self) -> u32 {
        (self.relevance_score.clamp(0.0, 1.0) * 100.0) as u32
    }
}

/// One page of a feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedPage {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<FeedItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub limit: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub offset: u32,
}

/// Filters and pagination for a feed request.
/// Unset values are left out of the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedOptions {
    pub must_read_only: bool,
    pub since: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl FeedOptions {
    /// Query parameters in wire order: must_read, since, limit, offset
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.must_read_only {
            pairs.push(("must_read", "true".to_string()));
        }
        if let Some(since) = self.since.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("since", since.to_string()));
        }
        if self.limit > 0 {
            pairs.push(("limit", self.limit.to_string()));
        }
        if self.offset > 0 {
            pairs.push(("offset", self.offset.to_string()));
        }
        pairs
    }
}
