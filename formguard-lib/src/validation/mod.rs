//! Form validation coordinator.
//!
//! Rules pair a control with a static message for built-in constraint
//! failures and an optional [`AsyncCheck`](crate::check::AsyncCheck).
//! The coordinator runs them on every input event and before every
//! submission, keeping at most one error label after each control.
//!
//! # Example
//!
//! ```ignore
//! use formguard_lib::validation::{attach_events, Rule, RuleSet};
//!
//! let rules = RuleSet::new([
//!     Rule::new("login", "Lowercase letters only, 3 to 12 characters."),
//!     Rule::new("password", "At least 8 characters."),
//! ]);
//! attach_events(&rules, &document, "signUpForm", false)?;
//!
//! // Later, when the user presses the submit button:
//! if let SubmitRequest::Dispatched(dispatch) = document.request_submit("signUpForm") {
//!     dispatch.settled().await;
//! }
//! ```

mod annotation;
mod coordinator;
mod result;
mod rule;

pub use annotation::{ERROR_LABEL_CLASS, add_error_label, error_label, error_labels, remove_error_label};
pub use coordinator::{Binding, attach_events, validate_control, validate_form};
pub use result::{FieldError, ValidationResult};
pub use rule::{Rule, RuleSet};
