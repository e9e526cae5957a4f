//! Identity backend boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! The hosted identity platform is reached only through [`IdentityBackend`].
//! `FirebaseBackend` talks to the real service; tests script an in-memory
//! implementation. Everything above this module sees `ProviderUser` records
//! and validated [`BackendError`] values, never raw JSON.
//!
//! LIFECYCLE
//! =========
//! Session-change listeners are registered with [`subscribe`], which returns a
//! [`Subscription`] guard. Dropping the guard detaches the listener, so a
//! listener is released exactly once.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

#[cfg(test)]
#[path = "identity_mock.rs"]
pub(crate) mod identity_mock;

use std::sync::Arc;

use async_trait::async_trait;

use super::types::ProviderUser;

/// Provider error codes produced on this side of the boundary.
pub mod code {
    pub const NETWORK_REQUEST_FAILED: &str = "auth/network-request-failed";
    pub const POPUP_CLOSED_BY_USER: &str = "auth/popup-closed-by-user";
    pub const POPUP_BLOCKED: &str = "auth/popup-blocked";
    pub const USER_CANCELLED: &str = "auth/user-cancelled";
    pub const INTERNAL_ERROR: &str = "auth/internal-error";
    pub const OPERATION_NOT_ALLOWED: &str = "auth/operation-not-allowed";
    pub const NO_CURRENT_USER: &str = "auth/no-current-user";
}

/// Failure reported by the identity backend.
///
/// Raw `{code, message}` objects are validated into one of two shapes: a
/// usable code is present, or it is not.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("{code}: {message}")]
    Coded { code: String, message: String },
    #[error("{0}")]
    Uncoded(String),
}

impl BackendError {
    pub fn coded(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Coded { code: code.into(), message: message.into() }
    }

    /// Validate an untyped error object. A `code` counts only when it is a
    /// non-blank string.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        let message = value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_owned();
        match value.get("code").and_then(serde_json::Value::as_str) {
            Some(code) if !code.trim().is_empty() => Self::coded(code.trim(), message),
            _ => Self::Uncoded(message),
        }
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Coded { code, .. } => Some(code),
            Self::Uncoded(_) => None,
        }
    }
}

/// Handle identifying one registered session listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Callback receiving the signed-in account (or its absence).
pub type SessionListener = Arc<dyn Fn(Option<ProviderUser>) + Send + Sync>;

/// Remote identity authority.
///
/// Futures are not required to be `Send`: the browser runs everything on one
/// thread. Implementations must still be shareable so the store can live in a
/// Leptos context.
#[async_trait(?Send)]
pub trait IdentityBackend: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<ProviderUser, BackendError>;

    async fn create_user(&self, email: &str, password: &str) -> Result<ProviderUser, BackendError>;

    /// Set the display name of the currently signed-in account.
    async fn update_profile(&self, display_name: &str) -> Result<ProviderUser, BackendError>;

    /// Run the Google OAuth popup flow and sign in with its credential.
    async fn sign_in_with_popup(&self) -> Result<ProviderUser, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;

    /// In-memory cached account; never touches the network.
    fn current_user(&self) -> Option<ProviderUser>;

    fn add_listener(&self, listener: SessionListener) -> ListenerId;

    fn remove_listener(&self, id: ListenerId);
}

/// Registration guard for a session listener.
pub struct Subscription {
    backend: Arc<dyn IdentityBackend>,
    id: ListenerId,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish_non_exhaustive()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        log::debug!("session listener {} detached", self.id.0);
        self.backend.remove_listener(self.id);
    }
}

/// Register `listener` for session-change notifications.
pub fn subscribe(backend: &Arc<dyn IdentityBackend>, listener: SessionListener) -> Subscription {
    let id = backend.add_listener(listener);
    log::debug!("session listener {} attached", id.0);
    Subscription { backend: Arc::clone(backend), id }
}
