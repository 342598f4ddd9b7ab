//! Async checks: rule-specific validators that may wait before concluding.

mod availability;
mod password;

use std::future::Future;

use async_trait::async_trait;
use formdom::ControlHandle;

pub use availability::{Availability, AvailabilityCheck, AvailabilityClient, AvailabilityMessages};
pub use password::PasswordMatch;

use crate::error::CheckError;

/// A validator run after a control passes its built-in constraints.
///
/// Synchronous cross-field checks and suspending network checks implement
/// the same trait; they differ only in whether they await.
///
/// Returns `Ok(None)` when the value is acceptable, `Ok(Some(message))` to
/// report an error, or `Err(_)` when no conclusion could be reached (for
/// example because the value changed while waiting). Errors are discarded
/// by the coordinator.
#[async_trait]
pub trait AsyncCheck: Send + Sync {
    async fn check(&self, control: &ControlHandle) -> Result<Option<String>, CheckError>;
}

/// An [`AsyncCheck`] backed by a closure.
pub struct FnCheck<F>(F);

/// Build an [`AsyncCheck`] from a closure receiving the live control.
///
/// # Example
///
/// ```ignore
/// let not_admin = check::from_fn(|control| async move {
///     Ok((control.value() == "admin").then(|| "Reserved name".to_string()))
/// });
/// ```
pub fn from_fn<F, Fut>(f: F) -> FnCheck<F>
where
    F: Fn(ControlHandle) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<String>, CheckError>> + Send + 'static,
{
    FnCheck(f)
}

#[async_trait]
impl<F, Fut> AsyncCheck for FnCheck<F>
where
    F: Fn(ControlHandle) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<String>, CheckError>> + Send + 'static,
{
    async fn check(&self, control: &ControlHandle) -> Result<Option<String>, CheckError> {
        (self.0)(control.clone()).await
    }
}

/// Captures a control's value at invocation so that a check can detect,
/// after each wait, that the value has since changed.
#[derive(Debug, Clone)]
pub struct ValueGuard {
    control: ControlHandle,
    captured: String,
}

impl ValueGuard {
    pub fn capture(control: &ControlHandle) -> Self {
        Self {
            control: control.clone(),
            captured: control.value(),
        }
    }

    /// The value seen at capture time.
    pub fn value(&self) -> &str {
        &self.captured
    }

    /// `Err(CheckError::Stale)` if the control no longer holds the captured
    /// value.
    pub fn ensure_current(&self) -> Result<(), CheckError> {
        let current = self.control.value();
        if current == self.captured {
            Ok(())
        } else {
            Err(CheckError::Stale {
                captured: self.captured.clone(),
                current,
            })
        }
    }
}
