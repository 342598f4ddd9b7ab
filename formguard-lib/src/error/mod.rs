//! Error types

mod attach;
mod check;
mod config;

pub use attach::*;
pub use check::*;
pub use config::*;

/// Umbrella error for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An async check failed to reach a conclusion.
    #[error(transparent)]
    Check(#[from] CheckError),

    /// Event listeners could not be attached.
    #[error(transparent)]
    Attach(#[from] AttachError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
