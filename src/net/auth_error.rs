//! Translation from identity-backend failures to user-facing auth errors.
//!
//! DESIGN
//! ======
//! One lookup table keyed by the provider code. The `auth/` namespace the
//! backend prefixes its codes with is ignored for matching but kept in the
//! resulting `code`. Anything the table does not name falls to a single
//! `unknown` entry, so the function is total.

#[cfg(test)]
#[path = "auth_error_test.rs"]
mod auth_error_test;

use serde::{Deserialize, Serialize};

use super::identity::BackendError;

/// Code reported for failures the table does not recognize.
pub const UNKNOWN_CODE: &str = "unknown";

const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Coarse classification used to pick the UI treatment of an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// User-correctable credential or account problem.
    Auth,
    /// Connectivity problem.
    Network,
    Unknown,
}

/// Normalized authentication failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub code: String,
    pub message: String,
    pub category: ErrorCategory,
}

impl AuthError {
    fn new(code: &str, message: &str, category: ErrorCategory) -> Self {
        Self { code: code.to_owned(), message: message.to_owned(), category }
    }

    fn unknown() -> Self {
        Self::new(UNKNOWN_CODE, UNEXPECTED_MESSAGE, ErrorCategory::Unknown)
    }
}

/// Map a backend failure to an [`AuthError`].
#[must_use]
pub fn translate(error: &BackendError) -> AuthError {
    let translated = translate_code(error.code());
    if translated.category == ErrorCategory::Unknown {
        log::warn!("unmapped identity error: {error}");
    }
    translated
}

/// Map a bare provider code (or its absence) to an [`AuthError`].
#[must_use]
pub fn translate_code(code: Option<&str>) -> AuthError {
    let Some(code) = code else {
        return AuthError::unknown();
    };
    match lookup(code.strip_prefix("auth/").unwrap_or(code)) {
        Some((message, category)) => AuthError::new(code, message, category),
        None => AuthError::unknown(),
    }
}

fn lookup(key: &str) -> Option<(&'static str, ErrorCategory)> {
    let entry = match key {
        "user-not-found" | "wrong-password" | "invalid-credential" => {
            ("Invalid email or password", ErrorCategory::Auth)
        }
        "email-already-in-use" => ("An account with this email already exists", ErrorCategory::Auth),
        "weak-password" => ("Password should be at least 6 characters", ErrorCategory::Auth),
        "invalid-email" => ("Invalid email address", ErrorCategory::Auth),
        "too-many-requests" => ("Too many failed attempts. Please try again later", ErrorCategory::Auth),
        "network-request-failed" => ("Network error. Please check your connection", ErrorCategory::Network),
        "popup-closed-by-user" => ("Sign-in cancelled", ErrorCategory::Auth),
        _ => return None,
    };
    Some(entry)
}
