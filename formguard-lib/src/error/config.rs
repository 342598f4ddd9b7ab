//! Configuration error types

/// Errors in [`CheckConfig`](crate::config::CheckConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The check endpoint base URL is not an absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The timeout is zero or unparsable.
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}
