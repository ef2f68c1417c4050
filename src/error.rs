//! Error types for the statistics pipeline
//!
//! Errors are split by the stage that raises them. Fetch errors carry the
//! URL that failed, parse errors carry the offending raw value, and argument
//! errors list the accepted options so callers can surface them directly.

use thiserror::Error;

/// Failure to retrieve a page or to find any table on it
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed with status {status}: {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("No tables found on the page: {url}")]
    NoTables { url: String },

    #[error("Failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("Fetch task for {url} did not complete: {reason}")]
    TaskFailed { url: String, reason: String },
}

impl FetchError {
    /// Create a status error for a non-success response
    pub fn status(url: &str, status: u16) -> Self {
        Self::Status {
            url: url.to_string(),
            status,
        }
    }

    /// Create an error for a page that carried no `<table>` elements
    pub fn no_tables(url: &str) -> Self {
        Self::NoTables {
            url: url.to_string(),
        }
    }

    /// URL of the page that failed, when the error is tied to one
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::ClientBuild { .. } => None,
            Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::Timeout { url, .. }
            | Self::NoTables { url }
            | Self::Body { url, .. }
            | Self::TaskFailed { url, .. } => Some(url),
        }
    }

    /// Check if retrying the same URL could plausibly succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } | Self::Body { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::ClientBuild { .. } | Self::NoTables { .. } | Self::TaskFailed { .. } => false,
        }
    }
}

/// A raw value that does not match the shape its column expects
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Error splitting made and attempted values from '{value}'")]
    Counter { value: String },

    #[error("Invalid clock value '{value}', expected MM:SS")]
    Clock { value: String },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    Selector { selector: String, reason: String },
}

impl ParseError {
    pub fn counter(value: &str) -> Self {
        Self::Counter {
            value: value.to_string(),
        }
    }

    pub fn clock(value: &str) -> Self {
        Self::Clock {
            value: value.to_string(),
        }
    }

    pub fn selector(selector: &str, reason: impl ToString) -> Self {
        Self::Selector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Caller input rejected before any network activity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("Invalid gender '{value}'. Must be one of: m, men, w, women")]
    Gender { value: String },

    #[error("Invalid season option '{value}'. Must be one of: {allowed}")]
    Season { value: String, allowed: String },

    #[error("Sport '{sport}' requires a gender (m or w)")]
    MissingGender { sport: String },

    #[error("Sport '{sport}' takes no gender")]
    UnexpectedGender { sport: String },

    #[error("Unknown sport '{value}'. Must be one of: {allowed}")]
    UnknownSport { value: String, allowed: String },
}

/// Top-level error returned by the query surface
#[derive(Error, Debug)]
pub enum StatsError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("Invalid page URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl StatsError {
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

pub type StatsResult<T> = Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_reports_url() {
        let error = FetchError::no_tables("https://example.test/teams");
        assert_eq!(error.url(), Some("https://example.test/teams"));
        assert!(!error.is_recoverable());
        assert!(error.to_string().contains("No tables found"));
    }

    #[test]
    fn test_server_errors_are_recoverable() {
        assert!(FetchError::status("u", 503).is_recoverable());
        assert!(FetchError::status("u", 429).is_recoverable());
        assert!(!FetchError::status("u", 404).is_recoverable());
    }

    #[test]
    fn test_stats_error_classification() {
        let fetch: StatsError = FetchError::no_tables("u").into();
        assert!(fetch.is_fetch());
        assert!(!fetch.is_invalid_argument());

        let argument: StatsError = InvalidArgument::Gender {
            value: "x".to_string(),
        }
        .into();
        assert!(argument.is_invalid_argument());
        assert!(argument.to_string().contains("m, men, w, women"));

        let parse: StatsError = ParseError::counter("12").into();
        assert!(parse.is_parse());
    }
}
