//! Dismissible banner showing the session store's last error.

use leptos::prelude::*;

use crate::net::auth_error::ErrorCategory;
use crate::state::session::SessionStore;

#[component]
pub fn AuthErrorBanner() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let state = store.state();

    let error = move || state.with(|s| s.error.clone());
    let class = move || match error().map(|e| e.category) {
        Some(ErrorCategory::Network) => "auth-error auth-error--network",
        Some(ErrorCategory::Auth) => "auth-error auth-error--auth",
        _ => "auth-error",
    };

    view! {
        <Show when=move || error().is_some()>
            <div class=class role="alert">
                <span class="auth-error__message">{move || error().map(|e| e.message).unwrap_or_default()}</span>
                <button
                    class="auth-error__dismiss"
                    type="button"
                    aria-label="Dismiss"
                    on:click={
                        let store = store.clone();
                        move |_| store.clear_error()
                    }
                >
                    "\u{00d7}"
                </button>
            </div>
        </Show>
    }
}
