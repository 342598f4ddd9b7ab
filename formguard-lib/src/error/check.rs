//! Async check error types

/// Reasons an async check reached no conclusion.
///
/// None of these are shown to the user: the coordinator discards the result
/// and leaves the control unannotated.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The control's value changed while the check was waiting.
    #[error("value changed from {captured:?} to {current:?} during check")]
    Stale {
        /// Value at invocation.
        captured: String,
        /// Value at resolution.
        current: String,
    },

    /// A control the check depends on is not in the document.
    #[error("control not found: {0}")]
    MissingControl(String),

    /// Network error during the remote lookup.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote response could not be decoded.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl CheckError {
    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns `true` if the result was discarded because the value changed.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }
}
