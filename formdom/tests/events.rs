use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use formdom::{Document, Element, EventKind, SubmitRequest};
use futures::FutureExt;

fn form() -> Document {
    Document::new(
        Element::form("form")
            .child(Element::input("login").required(true))
            .child(Element::input("note")),
    )
}

// ============================================================================
// Input Events
// ============================================================================

#[tokio::test]
async fn test_input_sets_value_before_listeners_run() {
    let doc = form();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let seen_by_listener = seen.clone();
    let reader = doc.clone();
    doc.add_listener("login", EventKind::Input, move |event| {
        let value = reader.value(event.target()).unwrap();
        seen_by_listener.lock().unwrap().push(value);
        async {}.boxed()
    });

    doc.input("login", "a").settled().await;
    doc.input("login", "al").settled().await;

    assert_eq!(*seen.lock().unwrap(), vec!["a", "al"]);
}

#[tokio::test]
async fn test_listeners_are_scoped_to_target_and_kind() {
    let doc = form();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    doc.add_listener("login", EventKind::Input, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        async {}.boxed()
    });

    doc.input("note", "x").settled().await;
    let dispatch = doc.input("login", "x");
    assert_eq!(dispatch.listener_count(), 1);
    dispatch.settled().await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(doc.listener_count("login", EventKind::Input), 1);
    assert_eq!(doc.listener_count("login", EventKind::Submit), 0);
}

#[tokio::test]
async fn test_input_on_unknown_element() {
    let doc = form();
    let dispatch = doc.input("missing", "x");
    assert_eq!(dispatch.listener_count(), 0);
    dispatch.settled().await;
}

#[tokio::test]
async fn test_listener_future_runs_on_settle() {
    let doc = form();
    let done = Arc::new(AtomicUsize::new(0));

    let flag = done.clone();
    doc.add_listener("login", EventKind::Input, move |_| {
        let flag = flag.clone();
        async move {
            tokio::task::yield_now().await;
            flag.fetch_add(1, Ordering::SeqCst);
        }
        .boxed()
    });

    let dispatch = doc.input("login", "x");
    assert_eq!(done.load(Ordering::SeqCst), 0);
    dispatch.settled().await;
    assert_eq!(done.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Submit Events
// ============================================================================

#[tokio::test]
async fn test_native_validation_blocks_submit() {
    let doc = form();
    let fired = Arc::new(AtomicUsize::new(0));

    let counter = fired.clone();
    doc.add_listener("form", EventKind::Submit, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        async {}.boxed()
    });

    match doc.request_submit("form") {
        SubmitRequest::Blocked(invalid) => assert_eq!(invalid, vec!["login"]),
        other => panic!("expected Blocked, got {other:?}"),
    }
    assert_eq!(fired.load(Ordering::SeqCst), 0, "no submit event when blocked");
    assert_eq!(doc.submissions("form"), 0);
}

#[tokio::test]
async fn test_no_validate_dispatches_submit() {
    let doc = form();
    doc.set_no_validate("form", true);

    match doc.request_submit("form") {
        SubmitRequest::Dispatched(dispatch) => {
            assert!(!dispatch.default_prevented());
            dispatch.settled().await;
        }
        other => panic!("expected Dispatched, got {other:?}"),
    }
    assert_eq!(doc.submissions("form"), 1);
}

#[tokio::test]
async fn test_prevent_default_stops_native_submit() {
    let doc = form();
    doc.set_no_validate("form", true);
    doc.add_listener("form", EventKind::Submit, |event| {
        event.prevent_default();
        async {}.boxed()
    });

    match doc.request_submit("form") {
        SubmitRequest::Dispatched(dispatch) => {
            assert!(dispatch.default_prevented());
            dispatch.settled().await;
        }
        other => panic!("expected Dispatched, got {other:?}"),
    }
    assert_eq!(doc.submissions("form"), 0);
}

#[test]
fn test_request_submit_unknown_form() {
    let doc = form();
    assert!(matches!(doc.request_submit("missing"), SubmitRequest::NotFound));
}
