//! Inline error labels placed directly after a control.

use formdom::element;
use formdom::{ControlHandle, Document, Element, Tag};
use log::trace;

use super::result::FieldError;

/// Class that marks error labels.
pub const ERROR_LABEL_CLASS: &str = "error-message";

fn is_error_label(element: &Element) -> bool {
    element.tag == Tag::Label && element.has_class(ERROR_LABEL_CLASS)
}

/// Remove the error label following `control`, if any. Returns whether a
/// label was removed.
pub fn remove_error_label(control: &ControlHandle) -> bool {
    control.document().update(|root| detach_label(root, control.id()))
}

fn detach_label(root: &mut Element, control_id: &str) -> bool {
    let label_id = match element::next_sibling(root, control_id) {
        Some(next) if is_error_label(next) => next.id.clone(),
        _ => return false,
    };
    trace!("clear annotation on {control_id}");
    element::remove_element(root, &label_id).is_some()
}

/// Attach `message` as the error label of `control`, replacing any existing
/// label in the same step. Returns false if the control is no longer in the
/// document.
pub fn add_error_label(control: &ControlHandle, message: &str) -> bool {
    let label = Element::label(message)
        .class(ERROR_LABEL_CLASS)
        .for_control(control.id());

    control.document().update(|root| {
        detach_label(root, control.id());
        trace!("annotate {}: {message}", control.id());
        element::insert_after(root, control.id(), label)
    })
}

/// The message currently attached to `control`.
pub fn error_label(control: &ControlHandle) -> Option<String> {
    control
        .document()
        .next_sibling(control.id())
        .filter(is_error_label)
        .map(|label| label.text)
}

/// Every error label inside `scope`, in document order.
pub fn error_labels(document: &Document, scope: &str) -> Vec<FieldError> {
    document
        .elements_by_class(scope, ERROR_LABEL_CLASS)
        .into_iter()
        .filter(|e| e.tag == Tag::Label)
        .map(|label| {
            let field_id = label.get_attr("for").unwrap_or_default().to_string();
            FieldError::new(field_id, label.text)
        })
        .collect()
}
