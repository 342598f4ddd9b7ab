use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::future::BoxFuture;
use log::{debug, trace};

use crate::element::{self, Element};
use crate::event::{Dispatch, Event, EventKind, Handler, Listener, SubmitRequest};
use crate::validity::Validity;

#[derive(Default)]
struct DocumentInner {
    root: Element,
    listeners: Vec<Listener>,
    submissions: HashMap<String, usize>,
}

/// A shared, mutable document.
///
/// Cheap to clone: every clone refers to the same tree. Locks are only held
/// for the duration of a single call, never across listener futures.
///
/// # Example
///
/// ```
/// use formdom::{Document, Element};
///
/// let doc = Document::new(
///     Element::form("signup").child(Element::input("login").required(true)),
/// );
/// let login = doc.control("login").unwrap();
/// assert!(!login.validity().valid());
/// login.set_value("alice");
/// assert!(login.validity().valid());
/// ```
#[derive(Clone)]
pub struct Document {
    inner: Arc<RwLock<DocumentInner>>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            inner: Arc::new(RwLock::new(DocumentInner {
                root,
                ..Default::default()
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, DocumentInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DocumentInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` against the tree.
    pub fn inspect<R>(&self, f: impl FnOnce(&Element) -> R) -> R {
        f(&self.read().root)
    }

    /// Run `f` against the tree with exclusive access. Everything `f` does
    /// is observed by other handles as a single change.
    pub fn update<R>(&self, f: impl FnOnce(&mut Element) -> R) -> R {
        f(&mut self.write().root)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inspect(|root| element::find_element(root, id).is_some())
    }

    /// Snapshot of an element.
    pub fn element(&self, id: &str) -> Option<Element> {
        self.inspect(|root| element::find_element(root, id).cloned())
    }

    /// Look up a control (input or select) by ID.
    pub fn control(&self, id: &str) -> Option<ControlHandle> {
        let is_control =
            self.inspect(|root| element::find_element(root, id).is_some_and(|e| e.tag.is_control()));
        is_control.then(|| ControlHandle {
            document: self.clone(),
            id: id.to_string(),
        })
    }

    pub fn value(&self, id: &str) -> Option<String> {
        self.inspect(|root| element::find_element(root, id).map(|e| e.value.clone()))
    }

    pub fn validity(&self, id: &str) -> Option<Validity> {
        self.inspect(|root| element::find_element(root, id).map(Element::validity))
    }

    /// Set a value without firing any event. Returns false if the element
    /// does not exist. See [`Element::set_value`] for selects.
    pub fn set_value(&self, id: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        self.update(|root| match element::find_element_mut(root, id) {
            Some(el) => {
                el.set_value(value);
                true
            }
            None => false,
        })
    }

    /// Simulate the user editing a control: set the value, then dispatch an
    /// input event on it.
    pub fn input(&self, id: &str, value: impl Into<String>) -> Dispatch {
        if !self.set_value(id, value) {
            debug!("input on unknown element {id}");
            return Dispatch::empty();
        }
        self.dispatch(Event::new(EventKind::Input, id))
    }

    pub fn next_sibling(&self, id: &str) -> Option<Element> {
        self.inspect(|root| element::next_sibling(root, id).cloned())
    }

    pub fn insert_after(&self, id: &str, new: Element) -> bool {
        trace!("insert {} after {id}", new.id);
        self.update(|root| element::insert_after(root, id, new))
    }

    pub fn remove(&self, id: &str) -> Option<Element> {
        trace!("remove {id}");
        self.update(|root| element::remove_element(root, id))
    }

    /// Snapshots of the descendants of `scope` that carry `class`.
    pub fn elements_by_class(&self, scope: &str, class: &str) -> Vec<Element> {
        self.inspect(|root| {
            element::find_element(root, scope)
                .map(|scope| element::elements_by_class(scope, class).into_iter().cloned().collect())
                .unwrap_or_default()
        })
    }

    pub fn no_validate(&self, form_id: &str) -> Option<bool> {
        self.inspect(|root| element::find_element(root, form_id).map(|f| f.no_validate))
    }

    /// Returns false if the element does not exist.
    pub fn set_no_validate(&self, form_id: &str, no_validate: bool) -> bool {
        self.update(|root| match element::find_element_mut(root, form_id) {
            Some(form) => {
                form.no_validate = no_validate;
                true
            }
            None => false,
        })
    }

    /// IDs of the controls inside `form_id` that fail constraint validation.
    pub fn invalid_controls(&self, form_id: &str) -> Vec<String> {
        self.inspect(|root| {
            element::find_element(root, form_id)
                .map(|form| {
                    element::controls(form)
                        .into_iter()
                        .filter(|c| !c.validity().valid())
                        .map(|c| c.id.clone())
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    /// Submit a form programmatically. Fires no events and skips constraint
    /// validation. Returns false if the form does not exist.
    pub fn submit(&self, form_id: &str) -> bool {
        let mut inner = self.write();
        if element::find_element(&inner.root, form_id).is_none() {
            return false;
        }
        *inner.submissions.entry(form_id.to_string()).or_default() += 1;
        debug!("form {form_id} submitted");
        true
    }

    /// How many times a form has been submitted.
    pub fn submissions(&self, form_id: &str) -> usize {
        self.read().submissions.get(form_id).copied().unwrap_or(0)
    }

    /// Ask a form to submit, the way a submit button would.
    ///
    /// Unless the form has `no_validate` set, invalid controls block the
    /// submission before any submit event. Otherwise the submit event is
    /// dispatched and, if no listener prevented the default, the form is
    /// submitted.
    pub fn request_submit(&self, form_id: &str) -> SubmitRequest {
        let Some(no_validate) = self.no_validate(form_id) else {
            return SubmitRequest::NotFound;
        };

        if !no_validate {
            let invalid = self.invalid_controls(form_id);
            if !invalid.is_empty() {
                debug!("native validation blocked {form_id}: {invalid:?}");
                return SubmitRequest::Blocked(invalid);
            }
        }

        let dispatch = self.dispatch(Event::new(EventKind::Submit, form_id));
        if !dispatch.default_prevented() {
            self.submit(form_id);
        }
        SubmitRequest::Dispatched(dispatch)
    }

    /// Register a listener for events of `kind` targeted at `target`.
    pub fn add_listener<F>(&self, target: impl Into<String>, kind: EventKind, handler: F)
    where
        F: Fn(&Event) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        self.write().listeners.push(Listener {
            target: target.into(),
            kind,
            handler,
        });
    }

    pub fn listener_count(&self, target: &str, kind: EventKind) -> usize {
        self.read()
            .listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .count()
    }

    /// Run the synchronous part of every matching listener and collect their
    /// futures.
    pub fn dispatch(&self, event: Event) -> Dispatch {
        let handlers: Vec<Handler> = self
            .read()
            .listeners
            .iter()
            .filter(|l| l.target == event.target() && l.kind == event.kind())
            .map(|l| l.handler.clone())
            .collect();

        trace!(
            "dispatch {:?} on {} to {} listener(s)",
            event.kind(),
            event.target(),
            handlers.len()
        );

        let tasks = handlers.iter().map(|handler| handler(&event)).collect();
        Dispatch::new(tasks, event.default_prevented())
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("Document")
            .field("root", &inner.root.id)
            .field("listeners", &inner.listeners.len())
            .finish_non_exhaustive()
    }
}

/// A live reference to a control. Reads always see the current state of the
/// document; if the control has been removed, it reads as empty and valid.
#[derive(Clone)]
pub struct ControlHandle {
    document: Document,
    id: String,
}

impl ControlHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn value(&self) -> String {
        self.document.value(&self.id).unwrap_or_default()
    }

    pub fn validity(&self) -> Validity {
        self.document.validity(&self.id).unwrap_or_default()
    }

    pub fn set_value(&self, value: impl Into<String>) -> bool {
        self.document.set_value(&self.id, value)
    }

    pub fn is_attached(&self) -> bool {
        self.document.contains(&self.id)
    }
}

impl std::fmt::Debug for ControlHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlHandle").field("id", &self.id).finish()
    }
}
