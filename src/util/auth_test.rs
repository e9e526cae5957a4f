use super::*;
use crate::state::session::LoadingFlags;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        email: "ada@example.com".to_owned(),
        display_name: Some("Ada".to_owned()),
        photo_url: None,
        email_verified: Some(true),
    }
}

// =============================================================
// authenticated_gate
// =============================================================

#[test]
fn authenticated_gate_loads_while_initializing() {
    assert_eq!(authenticated_gate(None, true), GuardDecision::Loading);
    assert_eq!(authenticated_gate(Some(&user()), true), GuardDecision::Loading);
}

#[test]
fn authenticated_gate_redirects_guests_to_login() {
    assert_eq!(authenticated_gate(None, false), GuardDecision::Redirect(Destination::Login));
}

#[test]
fn authenticated_gate_allows_signed_in_user() {
    assert_eq!(authenticated_gate(Some(&user()), false), GuardDecision::Allow);
}

// =============================================================
// guest_gate
// =============================================================

#[test]
fn guest_gate_loads_while_initializing() {
    assert_eq!(guest_gate(None, true), GuardDecision::Loading);
    assert_eq!(guest_gate(Some(&user()), true), GuardDecision::Loading);
}

#[test]
fn guest_gate_redirects_signed_in_user_to_dashboard() {
    assert_eq!(guest_gate(Some(&user()), false), GuardDecision::Redirect(Destination::Dashboard));
}

#[test]
fn guest_gate_allows_guests() {
    assert_eq!(guest_gate(None, false), GuardDecision::Allow);
}

// =============================================================
// Gate over SessionState
// =============================================================

#[test]
fn gate_reads_session_state() {
    let mut state = SessionState::default();
    assert_eq!(Gate::Authenticated.decide(&state), GuardDecision::Loading);
    assert_eq!(Gate::Guest.decide(&state), GuardDecision::Loading);

    state.loading = LoadingFlags { initializing: false, ..LoadingFlags::default() };
    assert_eq!(Gate::Authenticated.decide(&state), GuardDecision::Redirect(Destination::Login));
    assert_eq!(Gate::Guest.decide(&state), GuardDecision::Allow);

    state.user = Some(user());
    assert_eq!(Gate::Authenticated.decide(&state), GuardDecision::Allow);
    assert_eq!(Gate::Guest.decide(&state), GuardDecision::Redirect(Destination::Dashboard));
}

#[test]
fn destination_paths() {
    assert_eq!(Destination::Dashboard.path(), "/dashboard");
    assert_eq!(Destination::Login.path(), "/login");
    assert_eq!(Destination::Signup.path(), "/signup");
}
