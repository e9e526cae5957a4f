//! Login page with email/password form and Google popup sign-in.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::auth_error_banner::AuthErrorBanner;
use crate::state::session::SessionStore;
use crate::util::form::validate_login;

/// Login page. The guest route guard moves the user on once signed in.
#[component]
pub fn LoginPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let state = store.state();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let hint = RwSignal::new(None::<&'static str>);

    let busy = move || submitting.get() || state.with(|s| s.loading.sign_in);

    // Typing dismisses any stale error.
    let on_edit = {
        let store = store.clone();
        move || {
            hint.set(None);
            if state.with_untracked(|s| s.error.is_some()) {
                store.clear_error();
            }
        }
    };

    let on_submit = {
        let store = store.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if submitting.get_untracked() {
                return;
            }
            let (email, password) = match validate_login(&email.get_untracked(), &password.get_untracked()) {
                Ok(fields) => fields,
                Err(message) => {
                    hint.set(Some(message));
                    return;
                }
            };
            submitting.set(true);
            let store = store.clone();
            spawn_local(async move {
                if let Err(e) = store.sign_in(&email, &password).await {
                    leptos::logging::warn!("sign-in failed: {}", e.code);
                }
                submitting.set(false);
            });
        }
    };

    let on_google = {
        let store = store.clone();
        move |_| {
            if submitting.get_untracked() {
                return;
            }
            submitting.set(true);
            let store = store.clone();
            spawn_local(async move {
                if let Err(e) = store.sign_in_with_google().await {
                    leptos::logging::warn!("google sign-in failed: {}", e.code);
                }
                submitting.set(false);
            });
        }
    };

    let on_email_input = {
        let on_edit = on_edit.clone();
        move |ev| {
            email.set(event_target_value(&ev));
            on_edit();
        }
    };
    let on_password_input = move |ev| {
        password.set(event_target_value(&ev));
        on_edit();
    };

    view! {
        <div class="login-page">
            <h1>"Taskdeck"</h1>
            <p>"Sign in to your workspace"</p>

            <AuthErrorBanner/>

            <form class="login-page__form" on:submit=on_submit>
                <label class="login-page__field">
                    <span>"Email"</span>
                    <input
                        type="email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=on_email_input
                    />
                </label>
                <label class="login-page__field">
                    <span>"Password"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=on_password_input
                    />
                </label>
                {move || hint.get().map(|message| view! { <p class="login-page__hint">{message}</p> })}
                <button class="btn btn--primary" type="submit" disabled=busy>
                    {move || if busy() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>

            <div class="login-page__divider">"or"</div>

            <button class="btn login-page__google" type="button" on:click=on_google disabled=busy>
                "Continue with Google"
            </button>

            <p class="login-page__footer">
                "No account? "
                <a href="/signup">"Create one"</a>
            </p>
        </div>
    }
}
