//! Recipe API access
//!
//! `RecipeSource` is the seam between the query pipeline and the network.
//! `RecipeClient` is the production implementation over reqwest; tests
//! substitute scripted sources with controlled latency.

mod client;
mod types;

pub use client::RecipeClient;
pub use types::{
    RecipeInformation, SEARCH_PATH, SearchResponse, SearchResult, information_path,
};

use std::future::Future;

use crate::error::LookupResult;

/// Source of search matches and recipe details
pub trait RecipeSource: Send + Sync + 'static {
    /// Search for at most `limit` matches of `query`
    ///
    /// A blank query is `LookupError::EmptyQuery`; a non-success HTTP status
    /// is reported as `LookupError::QuotaExceeded`.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = LookupResult<Vec<SearchResult>>> + Send;

    /// Fetch the detail record for a recipe id
    fn information(&self, id: u64) -> impl Future<Output = LookupResult<RecipeInformation>> + Send;
}
