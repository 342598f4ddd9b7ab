//! Cross-field password confirmation

use async_trait::async_trait;
use formdom::ControlHandle;

use super::AsyncCheck;
use crate::error::CheckError;

/// Reports `message` when the checked control differs from the control
/// `other_id` in the same document.
#[derive(Debug, Clone)]
pub struct PasswordMatch {
    other_id: String,
    message: String,
}

impl PasswordMatch {
    pub fn new(other_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            other_id: other_id.into(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl AsyncCheck for PasswordMatch {
    async fn check(&self, control: &ControlHandle) -> Result<Option<String>, CheckError> {
        let other = control
            .document()
            .value(&self.other_id)
            .ok_or_else(|| CheckError::MissingControl(self.other_id.clone()))?;

        Ok((other != control.value()).then(|| self.message.clone()))
    }
}
