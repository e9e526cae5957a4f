//! Signed-in landing page with greeting, sign-out, and task list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::auth_error_banner::AuthErrorBanner;
use crate::components::task_list::TaskListPanel;
use crate::net::types::User;
use crate::state::session::SessionStore;

/// Dashboard page. Only reachable behind the authenticated route guard.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let state = store.state();

    let greeting = move || {
        state.with(|s| s.user.as_ref().map_or_else(String::new, |u| format!("Welcome, {}", u.label())))
    };
    let signing_out = move || state.with(|s| s.loading.sign_out);
    let initials = move || state.with(|s| s.user.as_ref().and_then(User::initials).unwrap_or_else(|| "?".to_owned()));
    let email = move || state.with(|s| s.user.as_ref().map(|u| u.email.clone()).unwrap_or_default());

    let on_sign_out = move |_| {
        let store = store.clone();
        spawn_local(async move {
            if let Err(e) = store.sign_out().await {
                leptos::logging::warn!("sign-out failed: {}", e.code);
            }
        });
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{greeting}</h1>
                <div class="dashboard-page__account" title="Account">
                    <span class="dashboard-page__avatar" aria-hidden="true">{initials}</span>
                    <span class="dashboard-page__email">{email}</span>
                </div>
                <button class="btn" on:click=on_sign_out disabled=signing_out>
                    {move || if signing_out() { "Signing out..." } else { "Sign out" }}
                </button>
            </header>

            <AuthErrorBanner/>

            <TaskListPanel/>
        </div>
    }
}
