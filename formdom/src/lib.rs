//! In-memory document model for HTML-like forms.
//!
//! Provides an element tree with form controls, built-in constraint
//! validation, input/submit events, and the small set of tree mutations
//! needed to annotate controls.

pub mod document;
pub mod element;
pub mod event;
pub mod types;
pub mod validity;

pub use document::{ControlHandle, Document};
pub use element::Element;
pub use event::{Dispatch, Event, EventKind, Handler, SubmitRequest};
pub use types::*;
pub use validity::{Constraints, Pattern, Validity};
