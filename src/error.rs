//! Error types for the recipe lookup pipeline
//!
//! Every failure the pipeline can produce is handled inside the controller;
//! only `QuotaExceeded` ever reaches the user (as a transient notification).
//! The rest are logged and swallowed, leaving the last good state in place.

use thiserror::Error;

/// Result type alias for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

/// Error types for recipe lookups
#[derive(Debug, Error)]
pub enum LookupError {
    /// Query was empty or whitespace-only; never sent to the API
    #[error("Query is empty")]
    EmptyQuery,

    /// Primary search answered with a non-success status
    #[error("Request quota exceeded (HTTP {status})")]
    QuotaExceeded { status: u16 },

    /// Detail request answered with a non-success status
    #[error("HTTP error {status}: {path}")]
    Http { status: u16, path: String },

    /// Transport failure (connect, TLS, timeout, body read)
    ///
    /// Stored without its request URL: the query string carries the API key.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Response body was not the JSON shape we expect
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// URL could not be built or parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Could not hand a link to the system opener
    #[error("Failed to open link: {0}")]
    OpenLink(#[from] std::io::Error),

    /// Work belonged to a superseded epoch
    #[error("Superseded by a newer query")]
    Cancelled,
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Network(err.without_url())
    }
}

impl LookupError {
    /// Whether this failure produces a visible notification
    #[must_use]
    pub fn is_user_visible(&self) -> bool {
        matches!(self, LookupError::QuotaExceeded { .. })
    }

    /// Whether this is a superseded epoch rather than a real failure
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, LookupError::Cancelled)
    }

    /// Message shown to the user for visible failures
    #[must_use]
    pub fn notification_message(&self) -> Option<String> {
        self.is_user_visible().then(|| self.to_string())
    }
}
