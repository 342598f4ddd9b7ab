//! Drives rule validation from input and submit events.

use formdom::{ControlHandle, Document, Event, EventKind};
use futures::FutureExt;
use futures::future::join_all;
use log::{debug, info, warn};

use super::annotation::{add_error_label, error_labels, remove_error_label};
use super::result::ValidationResult;
use super::rule::{Rule, RuleSet};
use crate::error::{AttachError, CheckError};

/// Validate one control against its rule and update its annotation.
///
/// Clears the existing annotation first. A control failing its built-in
/// constraints gets the rule's static message without running the async
/// check. Otherwise the async check runs unless `suppress_checks` is set;
/// if it fails (including a stale result), the control is left without an
/// annotation.
pub async fn validate_control(rule: &Rule, control: &ControlHandle, suppress_checks: bool) {
    remove_error_label(control);

    let message = match outcome_message(rule, control, suppress_checks).await {
        Ok(message) => message.filter(|m| !m.is_empty()),
        Err(err) => {
            debug!("{}: no conclusion: {err}", control.id());
            return;
        }
    };

    match message {
        Some(message) => {
            debug!("{}: invalid: {message}", control.id());
            add_error_label(control, &message);
        }
        None => debug!("{}: valid", control.id()),
    }
}

async fn outcome_message(
    rule: &Rule,
    control: &ControlHandle,
    suppress_checks: bool,
) -> Result<Option<String>, CheckError> {
    if !control.validity().valid() {
        return Ok(Some(rule.message().to_string()));
    }

    match rule.async_check() {
        Some(check) if !suppress_checks => check.check(control).await,
        _ => Ok(None),
    }
}

/// Validate every rule's control concurrently and report the annotations
/// present in `form_id` once all of them have settled.
///
/// Rules whose control is not in the document are skipped.
pub async fn validate_form(
    rules: &RuleSet,
    document: &Document,
    form_id: &str,
    suppress_checks: bool,
) -> ValidationResult {
    let passes = rules.iter().filter_map(|rule| {
        let Some(control) = document.control(rule.field_id()) else {
            debug!("{}: no control, skipped", rule.field_id());
            return None;
        };
        Some(async move { validate_control(rule, &control, suppress_checks).await })
    });

    join_all(passes).await;

    ValidationResult::from_errors(error_labels(document, form_id))
}

/// Re-validate the non-empty dependents of `rule`. Dependents do not cascade.
async fn revalidate_dependents(rules: &RuleSet, document: &Document, rule: &Rule) {
    for dependent_id in rule.dependents() {
        let Some(control) = document.control(dependent_id) else {
            continue;
        };
        if control.value().is_empty() {
            continue;
        }
        let Some(dependent) = rules.get(dependent_id) else {
            warn!("{}: dependent {dependent_id} has no rule", rule.field_id());
            continue;
        };
        validate_control(dependent, &control, false).await;
    }
}

/// What [`attach_events`] wired up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// The guarded form.
    pub form_id: String,
    /// Fields that received an input listener, in rule order.
    pub fields: Vec<String>,
}

/// Wire live and pre-submit validation into a form.
///
/// - Every rule with a control in the document gets an input listener that
///   runs [`validate_control`] on the event target, followed by its
///   dependents when the target passes its built-in constraints and checks
///   are not suppressed.
/// - The form's native validation is disabled (`no_validate`).
/// - The form gets a submit listener that prevents the native submission,
///   runs [`validate_form`], and submits the form programmatically if no
///   annotation remains.
pub fn attach_events(
    rules: &RuleSet,
    document: &Document,
    form_id: &str,
    suppress_checks: bool,
) -> Result<Binding, AttachError> {
    if !document.set_no_validate(form_id, true) {
        return Err(AttachError::FormNotFound(form_id.to_string()));
    }

    let mut fields = Vec::new();
    for rule in rules {
        if document.control(rule.field_id()).is_none() {
            debug!("{}: no control, not bound", rule.field_id());
            continue;
        }

        let rules = rules.clone();
        let doc = document.clone();
        let field_id = rule.field_id().to_string();
        document.add_listener(rule.field_id(), EventKind::Input, move |event: &Event| {
            let rules = rules.clone();
            let doc = doc.clone();
            let field_id = field_id.clone();
            let target = event.target().to_string();
            async move {
                let (Some(rule), Some(control)) = (rules.get(&field_id), doc.control(&target)) else {
                    return;
                };
                validate_control(rule, &control, suppress_checks).await;
                if !suppress_checks && control.validity().valid() {
                    revalidate_dependents(&rules, &doc, rule).await;
                }
            }
            .boxed()
        });
        fields.push(rule.field_id().to_string());
    }

    let rules = rules.clone();
    let doc = document.clone();
    let guarded = form_id.to_string();
    document.add_listener(form_id, EventKind::Submit, move |event: &Event| {
        event.prevent_default();
        let rules = rules.clone();
        let doc = doc.clone();
        let form_id = guarded.clone();
        async move {
            let result = validate_form(&rules, &doc, &form_id, suppress_checks).await;
            if result.is_valid() {
                info!("{form_id}: all fields valid, submitting");
                doc.submit(&form_id);
            } else {
                info!("{form_id}: blocked by {} error(s)", result.errors().len());
            }
        }
        .boxed()
    });

    debug!("{form_id}: bound {} field(s)", fields.len());
    Ok(Binding {
        form_id: form_id.to_string(),
        fields,
    })
}
