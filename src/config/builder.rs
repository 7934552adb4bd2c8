//! Type-safe builder for `ClientConfig` using the typestate pattern
//!
//! The API key is the only required field; `build()` is not available
//! until it has been supplied.

use anyhow::{Context, Result, anyhow, bail};
use std::marker::PhantomData;
use std::time::Duration;
use url::Url;

use super::types::{
    API_BASE_URL_ENV, API_KEY_ENV, ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_DEBOUNCE_MS,
    DEFAULT_NOTIFICATION_TTL_MS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESULT_LIMIT,
    DEFAULT_USER_AGENT, MAX_RESULT_LIMIT,
};

/// Parse and normalize the API endpoint
///
/// Only http(s) endpoints are accepted. The path is given a trailing slash
/// so `Url::join` appends endpoint paths instead of replacing the last segment.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let mut url =
        Url::parse(&with_scheme).map_err(|e| anyhow!("Invalid API base URL '{raw}': {e}"))?;

    if !matches!(url.scheme(), "http" | "https") {
        bail!("API base URL must use http or https, got '{}'", url.scheme());
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

// Type states for the builder
pub struct WithApiKey;

pub struct ClientConfigBuilder<State = ()> {
    pub(crate) api_base_url: String,
    pub(crate) api_key: Option<String>,
    pub(crate) debounce_ms: u64,
    pub(crate) result_limit: usize,
    pub(crate) notification_ttl_ms: u64,
    pub(crate) request_timeout_secs: Option<u64>,
    pub(crate) user_agent: String,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ClientConfigBuilder<()> {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            result_limit: DEFAULT_RESULT_LIMIT,
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            _phantom: PhantomData,
        }
    }
}

impl ClientConfig {
    /// Create a builder for configuring a `ClientConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ClientConfigBuilder<()> {
        ClientConfigBuilder::default()
    }

    /// Build a configuration from `RECIPE_API_KEY` and `RECIPE_API_BASE_URL`
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unset or either value fails validation.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .with_context(|| format!("{API_KEY_ENV} must be set to a recipe API key"))?;

        let builder = Self::builder().api_key(api_key);
        let builder = match std::env::var(API_BASE_URL_ENV) {
            Ok(base) if !base.trim().is_empty() => builder.api_base_url(base),
            _ => builder,
        };

        builder.build()
    }
}

impl ClientConfigBuilder<()> {
    pub fn api_key(self, key: impl Into<String>) -> ClientConfigBuilder<WithApiKey> {
        ClientConfigBuilder {
            api_base_url: self.api_base_url,
            api_key: Some(key.into()),
            debounce_ms: self.debounce_ms,
            result_limit: self.result_limit,
            notification_ttl_ms: self.notification_ttl_ms,
            request_timeout_secs: self.request_timeout_secs,
            user_agent: self.user_agent,
            _phantom: PhantomData,
        }
    }
}

impl<State> ClientConfigBuilder<State> {
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    #[must_use]
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    #[must_use]
    pub fn notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl ClientConfigBuilder<WithApiKey> {
    /// Validate and build the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is blank, the base URL is not a valid
    /// http(s) URL, the result limit is outside `1..=100`, or the debounce
    /// window is zero.
    pub fn build(self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("api_key must not be empty"))?;

        if self.result_limit == 0 || self.result_limit > MAX_RESULT_LIMIT {
            bail!(
                "result_limit must be between 1 and {MAX_RESULT_LIMIT}, got {}",
                self.result_limit
            );
        }

        if self.debounce_ms == 0 {
            bail!("debounce window must be greater than zero");
        }

        if self.request_timeout_secs == Some(0) {
            bail!("request_timeout_secs must be greater than zero when set");
        }

        Ok(ClientConfig {
            api_base_url: normalize_base_url(&self.api_base_url)?,
            api_key,
            debounce_ms: self.debounce_ms,
            result_limit: self.result_limit,
            notification_ttl_ms: self.notification_ttl_ms,
            request_timeout_secs: self.request_timeout_secs,
            user_agent: self.user_agent,
        })
    }
}
