//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` is created by the application root and provided through
//! context. Route guards and pages read its signal; forms call its actions.
//!
//! LIFECYCLE
//! =========
//! The store subscribes to session-change notifications exactly once, in
//! [`SessionStore::new`]. The first notification ends `initializing`, which
//! never turns back on. [`SessionStore::teardown`] drops the subscription;
//! later backend notifications no longer reach the state.
//!
//! ORDERING
//! ========
//! Actions are not serialized. Each action draws a ticket when it starts.
//! On completion only the most recently issued action writes `user` and
//! `error`, and a loading flag is cleared only by the most recent action of
//! its own kind. Superseded actions still hand their own result to the caller.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leptos::prelude::*;

use crate::net::auth_error::AuthError;
use crate::net::gateway::AuthGateway;
use crate::net::identity::Subscription;
use crate::net::types::User;

/// Per-operation loading flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadingFlags {
    pub sign_in: bool,
    pub sign_up: bool,
    pub sign_out: bool,
    /// True until the first session notification arrives.
    pub initializing: bool,
}

impl Default for LoadingFlags {
    fn default() -> Self {
        Self { sign_in: false, sign_up: false, sign_out: false, initializing: true }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: LoadingFlags,
    pub error: Option<AuthError>,
}

/// User-initiated action kinds; Google sign-in shares `SignIn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ActionKind {
    SignIn,
    SignUp,
    SignOut,
}

impl ActionKind {
    fn index(self) -> usize {
        match self {
            Self::SignIn => 0,
            Self::SignUp => 1,
            Self::SignOut => 2,
        }
    }

    fn flag(self, loading: &mut LoadingFlags) -> &mut bool {
        match self {
            Self::SignIn => &mut loading.sign_in,
            Self::SignUp => &mut loading.sign_up,
            Self::SignOut => &mut loading.sign_out,
        }
    }
}

#[derive(Default)]
struct Tickets {
    issued: u64,
    latest: [u64; 3],
}

#[derive(Clone)]
pub struct SessionStore {
    state: RwSignal<SessionState>,
    gateway: AuthGateway,
    tickets: Arc<Mutex<Tickets>>,
    subscription: Arc<Mutex<Option<Subscription>>>,
}

impl SessionStore {
    /// Create the store and attach its single session subscription.
    pub fn new(gateway: AuthGateway) -> Self {
        let state = RwSignal::new(SessionState::default());
        let subscription = gateway.on_session_change(move |user| {
            state.update(|s| {
                if s.loading.initializing {
                    log::debug!("initial session resolved (signed in: {})", user.is_some());
                }
                s.user = user;
                s.loading.initializing = false;
            });
        });
        Self {
            state,
            gateway,
            tickets: Arc::default(),
            subscription: Arc::new(Mutex::new(Some(subscription))),
        }
    }

    /// Reactive, read-only view of the session state.
    pub fn state(&self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }

    /// Untracked copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.get_untracked()
    }

    /// # Errors
    ///
    /// Returns the translated failure after recording it in `error`.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let ticket = self.begin(ActionKind::SignIn);
        let result = self.gateway.sign_in_with_email(email, password).await;
        self.finish(ActionKind::SignIn, ticket, result.clone().map(Some));
        result
    }

    /// # Errors
    ///
    /// Returns the translated failure after recording it in `error`.
    pub async fn sign_up(&self, email: &str, password: &str, display_name: Option<&str>) -> Result<User, AuthError> {
        let ticket = self.begin(ActionKind::SignUp);
        let result = self.gateway.sign_up_with_email(email, password, display_name).await;
        self.finish(ActionKind::SignUp, ticket, result.clone().map(Some));
        result
    }

    /// # Errors
    ///
    /// Returns the translated failure after recording it in `error`.
    pub async fn sign_in_with_google(&self) -> Result<User, AuthError> {
        let ticket = self.begin(ActionKind::SignIn);
        let result = self.gateway.sign_in_with_google().await;
        self.finish(ActionKind::SignIn, ticket, result.clone().map(Some));
        result
    }

    /// # Errors
    ///
    /// Returns the translated failure after recording it in `error`.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let ticket = self.begin(ActionKind::SignOut);
        let result = self.gateway.sign_out().await;
        self.finish(ActionKind::SignOut, ticket, result.clone().map(|()| None));
        result
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    /// Detach from session notifications. Safe to call more than once.
    pub fn teardown(&self) {
        let subscription = self.subscription.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(subscription) = subscription {
            log::debug!("session store teardown, releasing listener {}", subscription.id().0);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    fn tickets(&self) -> MutexGuard<'_, Tickets> {
        self.tickets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, kind: ActionKind) -> u64 {
        let ticket = {
            let mut tickets = self.tickets();
            tickets.issued += 1;
            let issued = tickets.issued;
            tickets.latest[kind.index()] = issued;
            issued
        };
        log::debug!("{kind:?} started, ticket {ticket}");
        self.state.update(|s| {
            *kind.flag(&mut s.loading) = true;
            s.error = None;
        });
        ticket
    }

    fn finish(&self, kind: ActionKind, ticket: u64, outcome: Result<Option<User>, AuthError>) {
        let (newest, newest_of_kind) = {
            let tickets = self.tickets();
            (tickets.issued == ticket, tickets.latest[kind.index()] == ticket)
        };
        if !newest {
            log::debug!("{kind:?} ticket {ticket} superseded, result not applied");
        }
        self.state.update(|s| {
            if newest_of_kind {
                *kind.flag(&mut s.loading) = false;
            }
            if newest {
                match outcome {
                    Ok(user) => {
                        s.user = user;
                        s.error = None;
                    }
                    Err(e) => s.error = Some(e),
                }
            }
        });
    }
}
