//! Data structures for the recipe API wire format

use serde::{Deserialize, Serialize};

/// Path of the search endpoint, relative to the API base URL
pub const SEARCH_PATH: &str = "recipes/complexSearch";

/// A single search match
///
/// Only `id` and `title` are kept; any other fields in the response are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Recipe id, used to fetch the detail record
    pub id: u64,

    /// Recipe title
    pub title: String,
}

impl SearchResult {
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Body of a search response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Matches in API order
    pub results: Vec<SearchResult>,
}

/// Body of a recipe detail response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    /// Link to the original recipe page
    #[serde(default)]
    pub source_url: Option<String>,
}

impl RecipeInformation {
    #[must_use]
    pub fn with_source_url(url: impl Into<String>) -> Self {
        Self {
            source_url: Some(url.into()),
        }
    }
}

/// Detail endpoint path for a recipe id
#[must_use]
pub fn information_path(id: u64) -> String {
    format!("recipes/{id}/information")
}
