//! HTTP client for the recipe API

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::RecipeSource;
use super::types::{
    RecipeInformation, SEARCH_PATH, SearchResponse, SearchResult, information_path,
};
use crate::config::ClientConfig;
use crate::error::{LookupError, LookupResult};

/// reqwest-backed `RecipeSource`
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct RecipeClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl RecipeClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Network` if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> LookupResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.api_base_url().clone(),
            api_key: config.api_key().to_string(),
        })
    }

    /// Search URL for a query and result limit
    ///
    /// # Errors
    ///
    /// Returns `LookupError::InvalidUrl` if the endpoint cannot be joined.
    pub fn search_url(&self, query: &str, limit: usize) -> LookupResult<Url> {
        let mut url = self.base_url.join(SEARCH_PATH)?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("number", &limit.to_string())
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }

    /// Detail URL for a recipe id
    ///
    /// # Errors
    ///
    /// Returns `LookupError::InvalidUrl` if the endpoint cannot be joined.
    pub fn information_url(&self, id: u64) -> LookupResult<Url> {
        let mut url = self.base_url.join(&information_path(id))?;
        url.query_pairs_mut().append_pair("apiKey", &self.api_key);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> LookupResult<(u16, Option<T>)> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Ok((status.as_u16(), None));
        }

        let body = response.bytes().await?;
        Ok((status.as_u16(), Some(serde_json::from_slice(&body)?)))
    }
}

impl RecipeSource for RecipeClient {
    async fn search(&self, query: &str, limit: usize) -> LookupResult<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        let url = self.search_url(query, limit)?;
        debug!(query, limit, "GET {}", url.path());

        match self.get_json::<SearchResponse>(url).await? {
            (_, Some(body)) => Ok(body.results),
            (status, None) => Err(LookupError::QuotaExceeded { status }),
        }
    }

    async fn information(&self, id: u64) -> LookupResult<RecipeInformation> {
        let url = self.information_url(id)?;
        // The query string carries the API key; only the path is logged.
        let path = url.path().to_string();
        debug!(id, "GET {path}");

        match self.get_json::<RecipeInformation>(url).await? {
            (_, Some(body)) => Ok(body),
            (status, None) => Err(LookupError::Http { status, path }),
        }
    }
}
