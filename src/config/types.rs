//! Core configuration types for the recipe search client

use std::fmt;
use url::Url;

/// Default recipe API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.spoonacular.com";

/// Quiet period after the last keystroke before a search is issued
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Number of matches requested from the search endpoint
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Upper bound accepted for `result_limit`
pub const MAX_RESULT_LIMIT: usize = 100;

/// How long a notification stays visible
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 5_000;

/// Per-request HTTP timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "RECIPE_API_KEY";

/// Environment variable overriding the API endpoint
pub const API_BASE_URL_ENV: &str = "RECIPE_API_BASE_URL";

pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!("kodegen-recipe-search/", env!("CARGO_PKG_VERSION"));

/// Main configuration struct for the recipe search client
#[derive(Clone)]
pub struct ClientConfig {
    /// API endpoint.
    ///
    /// **INVARIANT:** path always ends in `/` (normalized in builder) so
    /// endpoint paths can be joined onto it without dropping a segment.
    pub(crate) api_base_url: Url,
    pub(crate) api_key: String,
    pub(crate) debounce_ms: u64,
    pub(crate) result_limit: usize,
    pub(crate) notification_ttl_ms: u64,
    /// `None` disables the per-request timeout
    pub(crate) request_timeout_secs: Option<u64>,
    pub(crate) user_agent: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("debounce_ms", &self.debounce_ms)
            .field("result_limit", &self.result_limit)
            .field("notification_ttl_ms", &self.notification_ttl_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
