use super::identity_mock::{MockBackend, record};
use super::*;
use std::sync::Mutex;

// =============================================================
// BackendError validation
// =============================================================

#[test]
fn from_value_with_code_is_coded() {
    let err = BackendError::from_value(&serde_json::json!({
        "code": "auth/wrong-password",
        "message": "Firebase: Error (auth/wrong-password)."
    }));
    assert_eq!(err.code(), Some("auth/wrong-password"));
}

#[test]
fn from_value_without_code_is_uncoded() {
    let err = BackendError::from_value(&serde_json::json!({ "message": "boom" }));
    assert_eq!(err, BackendError::Uncoded("boom".to_owned()));
    assert_eq!(err.code(), None);
}

#[test]
fn from_value_rejects_non_string_and_blank_codes() {
    let numeric = BackendError::from_value(&serde_json::json!({ "code": 400, "message": "x" }));
    assert_eq!(numeric.code(), None);
    let blank = BackendError::from_value(&serde_json::json!({ "code": "  " }));
    assert_eq!(blank, BackendError::Uncoded(String::new()));
}

#[test]
fn from_value_tolerates_non_object_input() {
    let err = BackendError::from_value(&serde_json::json!("just a string"));
    assert_eq!(err.code(), None);
}

#[test]
fn coded_display_includes_code_and_message() {
    let err = BackendError::coded("auth/invalid-email", "bad");
    assert_eq!(err.to_string(), "auth/invalid-email: bad");
}

// =============================================================
// Subscription lifecycle
// =============================================================

#[test]
fn subscription_receives_notifications_until_dropped() {
    let backend = MockBackend::new();
    let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let sub = subscribe(
        &backend.as_dyn(),
        Arc::new(move |user: Option<ProviderUser>| {
            sink.lock().unwrap().push(user.map(|u| u.local_id));
        }),
    );
    assert_eq!(backend.listener_count(), 1);

    backend.emit(Some(record("u1", "a@b.c")));
    backend.emit(None);
    drop(sub);
    backend.emit(Some(record("u2", "d@e.f")));

    assert_eq!(backend.listener_count(), 0);
    assert_eq!(*seen.lock().unwrap(), vec![Some("u1".to_owned()), None]);
}

#[test]
fn subscriptions_get_distinct_ids() {
    let backend = MockBackend::new();
    let dyn_backend = backend.as_dyn();
    let a = subscribe(&dyn_backend, Arc::new(|_| {}));
    let b = subscribe(&dyn_backend, Arc::new(|_| {}));
    assert_ne!(a.id(), b.id());
    drop(a);
    assert_eq!(backend.listener_count(), 1);
    drop(b);
    assert_eq!(backend.listener_count(), 0);
}
