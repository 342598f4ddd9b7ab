use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;

/// Kinds of events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The value of a control changed.
    Input,
    /// A form is about to be submitted.
    Submit,
}

/// An event delivered to listeners.
#[derive(Debug)]
pub struct Event {
    kind: EventKind,
    target: String,
    default_prevented: AtomicBool,
}

impl Event {
    pub fn new(kind: EventKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            default_prevented: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// ID of the element the event was dispatched on.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Cancel the default action (for `Submit`, the native submission).
    ///
    /// Only effective while the listener runs synchronously; the document
    /// decides on the default action before awaiting any listener future.
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::SeqCst);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::SeqCst)
    }
}

/// A listener. The synchronous part runs during dispatch; the returned
/// future is the listener's asynchronous work.
pub type Handler = Arc<dyn Fn(&Event) -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Clone)]
pub(crate) struct Listener {
    pub target: String,
    pub kind: EventKind,
    pub handler: Handler,
}

/// The outcome of dispatching an event: whether the default action was
/// prevented, plus the pending listener futures.
///
/// Dropping a `Dispatch` without awaiting it drops the listener work.
#[must_use = "listener futures do nothing unless awaited or spawned"]
pub struct Dispatch {
    tasks: Vec<BoxFuture<'static, ()>>,
    default_prevented: bool,
}

impl Dispatch {
    pub(crate) fn new(tasks: Vec<BoxFuture<'static, ()>>, default_prevented: bool) -> Self {
        Self {
            tasks,
            default_prevented,
        }
    }

    /// A dispatch that reached no listener.
    pub fn empty() -> Self {
        Self::new(Vec::new(), false)
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn listener_count(&self) -> usize {
        self.tasks.len()
    }

    /// Wait until every listener future has finished.
    pub async fn settled(self) {
        futures::future::join_all(self.tasks).await;
    }
}

impl std::fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatch")
            .field("listeners", &self.tasks.len())
            .field("default_prevented", &self.default_prevented)
            .finish()
    }
}

/// Result of asking a form to submit.
#[derive(Debug)]
pub enum SubmitRequest {
    /// Native constraint validation failed; no submit event was fired.
    /// Holds the IDs of the invalid controls.
    Blocked(Vec<String>),
    /// The submit event was dispatched. If no listener prevented the
    /// default, the form has already been submitted.
    Dispatched(Dispatch),
    /// No such form.
    NotFound,
}
