//! Event attachment error types

/// Errors that can occur while wiring a form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// The form to guard is not in the document.
    #[error("form not found: {0}")]
    FormNotFound(String),
}
