use super::*;

fn coded(code: &str) -> BackendError {
    BackendError::coded(code, "raw provider text")
}

// =============================================================
// Table entries
// =============================================================

#[test]
fn credential_codes_share_one_message() {
    for code in ["auth/user-not-found", "auth/wrong-password", "auth/invalid-credential"] {
        let err = translate(&coded(code));
        assert_eq!(err.code, code);
        assert_eq!(err.message, "Invalid email or password");
        assert_eq!(err.category, ErrorCategory::Auth);
    }
}

#[test]
fn every_table_entry_maps_to_its_pair() {
    let table = [
        ("auth/email-already-in-use", "An account with this email already exists", ErrorCategory::Auth),
        ("auth/weak-password", "Password should be at least 6 characters", ErrorCategory::Auth),
        ("auth/invalid-email", "Invalid email address", ErrorCategory::Auth),
        ("auth/too-many-requests", "Too many failed attempts. Please try again later", ErrorCategory::Auth),
        ("auth/network-request-failed", "Network error. Please check your connection", ErrorCategory::Network),
        ("auth/popup-closed-by-user", "Sign-in cancelled", ErrorCategory::Auth),
    ];
    for (code, message, category) in table {
        let err = translate(&coded(code));
        assert_eq!(err, AuthError { code: code.to_owned(), message: message.to_owned(), category });
    }
}

#[test]
fn unprefixed_codes_match_too() {
    let err = translate_code(Some("weak-password"));
    assert_eq!(err.code, "weak-password");
    assert_eq!(err.category, ErrorCategory::Auth);
}

#[test]
fn raw_provider_message_never_leaks() {
    let err = translate(&coded("auth/invalid-email"));
    assert_ne!(err.message, "raw provider text");
}

// =============================================================
// Fallback
// =============================================================

#[test]
fn unknown_code_falls_back() {
    let err = translate(&coded("auth/quota-exceeded"));
    assert_eq!(err.code, UNKNOWN_CODE);
    assert_eq!(err.message, "An unexpected error occurred");
    assert_eq!(err.category, ErrorCategory::Unknown);
}

#[test]
fn missing_code_falls_back() {
    let err = translate(&BackendError::Uncoded("socket hang up".to_owned()));
    assert_eq!(err, translate_code(None));
    assert_eq!(err.category, ErrorCategory::Unknown);
}

#[test]
fn malformed_error_object_falls_back() {
    let raw = BackendError::from_value(&serde_json::json!({ "code": ["not", "a", "string"] }));
    assert_eq!(translate(&raw).category, ErrorCategory::Unknown);
}

#[test]
fn namespace_alone_is_not_a_match() {
    assert_eq!(translate_code(Some("auth/")).category, ErrorCategory::Unknown);
    assert_eq!(translate_code(Some("")).category, ErrorCategory::Unknown);
}

#[test]
fn translation_is_deterministic() {
    let a = translate(&coded("auth/too-many-requests"));
    let b = translate(&coded("auth/too-many-requests"));
    assert_eq!(a, b);
}

#[test]
fn auth_error_displays_its_message() {
    let err = translate(&coded("auth/invalid-email"));
    assert_eq!(err.to_string(), "Invalid email address");
}

#[test]
fn category_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ErrorCategory::Network).unwrap(), "\"network\"");
}
