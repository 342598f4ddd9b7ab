//! Sign-up form validation
//!
//! Per-field rule checking, inline error labels, and an asynchronous
//! username availability check, driven over a [`formdom::Document`].

pub mod check;
pub mod config;
pub mod error;
pub mod signup;
pub mod validation;

pub use check::{AsyncCheck, AvailabilityCheck, AvailabilityClient, PasswordMatch};
pub use config::CheckConfig;
pub use error::Error;
pub use validation::{Rule, RuleSet, ValidationResult, attach_events, validate_control, validate_form};
