//! Data models for Paperzilla entities.
//!
//! - `Project`: a curation project and its digest settings
//! - `FeedPage`, `FeedItem`, `Paper`: the paginated, personalized paper feed
//! - `FeedOptions`: filters and pagination for feed requests

use serde::{Deserialize, Deserializer};

pub mod feed;
pub mod project;

pub use feed::{Author, FeedItem, FeedOptions, FeedPage, Paper, PaperSource, RelevanceClass};
pub use project::Project;

/// Decode an explicit `null` as the field's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
