//! Configuration module for the recipe search client
//!
//! This module provides the `ClientConfig` struct and its type-safe builder
//! for configuring the API endpoint, credentials and pipeline timing.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{ClientConfigBuilder, WithApiKey};
pub use types::{
    API_BASE_URL_ENV, API_KEY_ENV, ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_DEBOUNCE_MS,
    DEFAULT_NOTIFICATION_TTL_MS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESULT_LIMIT,
    MAX_RESULT_LIMIT,
};
