//! Remote check configuration

use std::time::Duration;

use crate::error::ConfigError;

/// Default base URL of the availability service.
pub const DEFAULT_CHECK_URL: &str = "http://localhost:5000";

/// Configuration for the remote availability check.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use formguard_lib::config::CheckConfig;
///
/// let config = CheckConfig::default()
///     .with_base_url("https://example.com")
///     .with_timeout(Duration::from_secs(5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Base URL; requests go to `{base_url}/check/{candidate}`.
    ///
    /// Default: `http://localhost:5000`
    pub base_url: String,

    /// Per-request timeout. A timed out request reaches no conclusion.
    ///
    /// Default: none
    pub timeout: Option<Duration>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHECK_URL.to_string(),
            timeout: None,
        }
    }
}

impl CheckConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from environment variables.
    ///
    /// - `FORMGUARD_CHECK_URL` - base URL
    /// - `FORMGUARD_CHECK_TIMEOUT` - timeout in seconds
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("FORMGUARD_CHECK_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            timeout: std::env::var("FORMGUARD_CHECK_TIMEOUT")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .or(defaults.timeout),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check that the base URL is an absolute http(s) URL and the timeout is
    /// non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                self.base_url,
                url.scheme()
            )));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidTimeout("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.base_url, DEFAULT_CHECK_URL);
        assert_eq!(config.timeout, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_relative_url() {
        let config = CheckConfig::new().with_base_url("/check");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = CheckConfig::new().with_base_url("ftp://example.com");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = CheckConfig::new().with_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout(_))));
    }
}
