//! Error types for research operations.
//!
//! [`ResearchError`] covers the failures that can surface at the collaborator
//! seams (fetching and decoding raw data). The analytics themselves never
//! fail; they resolve degenerate input to absent values instead.
//! [`DateParseError`] is returned by date parsing so callers can decide how
//! to treat an unparseable observation date.

use thiserror::Error;

/// Errors that can occur while fetching or decoding research data.
#[derive(Error, Debug)]
pub enum ResearchError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by a provider.
    #[error("Rate limited by {provider}: retry after {retry_after:?}")]
    RateLimited {
        /// The provider that rate limited the request.
        provider: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// The requested symbol was not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data is available for the requested indicator or statement.
    #[error("Data not available: {0}")]
    DataNotAvailable(String),

    /// Error parsing a provider payload.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No provider is registered for the requested data.
    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested feature is not supported.
    #[error("Feature not supported: {0}")]
    NotSupported(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for ResearchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Result type alias using [`ResearchError`].
pub type Result<T> = std::result::Result<T, ResearchError>;

/// Reasons an observation date string could not be turned into a calendar date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// The date string was empty.
    #[error("empty date string")]
    Empty,

    /// A `YYYY-Qn` string with a bad year or a quarter outside 1-4.
    #[error("invalid fiscal quarter: {0}")]
    InvalidQuarter(String),

    /// Not a valid `YYYY-MM-DD` date.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
