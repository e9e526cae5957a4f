//! Route wrappers applying the authenticated and guest gates.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::state::session::SessionStore;
use crate::util::auth::{Gate, GuardDecision};

/// Render `children` only for a signed-in user; guests go to `/login`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    guarded(Gate::Authenticated, children)
}

/// Render `children` only for guests; signed-in users go to `/dashboard`.
#[component]
pub fn RequireGuest(children: ChildrenFn) -> impl IntoView {
    guarded(Gate::Guest, children)
}

/// Full-page indicator shown while the initial session is unresolved.
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="auth-loading" role="status">
            <span class="auth-loading__spinner"></span>
            <p>"Loading..."</p>
        </div>
    }
}

fn guarded(gate: Gate, children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<SessionStore>().state();
    // Memoized so unrelated state changes (errors, loading flags) do not
    // rebuild the guarded subtree.
    let decision = Memo::new(move |_| state.with(|s| gate.decide(s)));

    move || match decision.get() {
        GuardDecision::Loading => view! { <LoadingScreen/> }.into_any(),
        GuardDecision::Redirect(destination) => view! { <Redirect path=destination.path()/> }.into_any(),
        GuardDecision::Allow => children().into_any(),
    }
}
