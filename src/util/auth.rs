//! Route-guard decisions shared by the guard components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes must apply identical redirect behavior, so the decision is a
//! pure function of the signed-in user and the `initializing` flag. Nothing is
//! decided while the initial session is unresolved.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;
use crate::state::session::SessionState;

/// Named routing destinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Authenticated landing page.
    Dashboard,
    Login,
    Signup,
}

impl Destination {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Login => "/login",
            Self::Signup => "/signup",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Initial session not known yet; show a loading indicator.
    Loading,
    Redirect(Destination),
    Allow,
}

/// Gate for routes that need a signed-in user.
#[must_use]
pub fn authenticated_gate(user: Option<&User>, initializing: bool) -> GuardDecision {
    match (initializing, user) {
        (true, _) => GuardDecision::Loading,
        (false, None) => GuardDecision::Redirect(Destination::Login),
        (false, Some(_)) => GuardDecision::Allow,
    }
}

/// Gate for routes only guests should see (login, signup).
#[must_use]
pub fn guest_gate(user: Option<&User>, initializing: bool) -> GuardDecision {
    match (initializing, user) {
        (true, _) => GuardDecision::Loading,
        (false, Some(_)) => GuardDecision::Redirect(Destination::Dashboard),
        (false, None) => GuardDecision::Allow,
    }
}

/// Which gate a guard component applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Authenticated,
    Guest,
}

impl Gate {
    #[must_use]
    pub fn decide(self, state: &SessionState) -> GuardDecision {
        let user = state.user.as_ref();
        let initializing = state.loading.initializing;
        match self {
            Self::Authenticated => authenticated_gate(user, initializing),
            Self::Guest => guest_gate(user, initializing),
        }
    }
}
