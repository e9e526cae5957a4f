//! Account creation page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::auth_error_banner::AuthErrorBanner;
use crate::state::session::SessionStore;
use crate::util::form::{MIN_PASSWORD_LEN, validate_signup};

#[component]
pub fn SignupPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let state = store.state();

    let display_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let hint = RwSignal::new(None::<&'static str>);

    let busy = move || submitting.get() || state.with(|s| s.loading.sign_up);

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
            let input = match validate_signup(
                &display_name.get_untracked(),
                &email.get_untracked(),
                &password.get_untracked(),
                &confirm.get_untracked(),
            ) {
                Ok(input) => input,
                Err(message) => {
                    hint.set(Some(message));
                    return;
                }
            };
            submitting.set(true);
            let store = store.clone();
            spawn_local(async move {
                let result = store.sign_up(&input.email, &input.password, input.display_name.as_deref()).await;
                if let Err(e) = result {
                    leptos::logging::warn!("sign-up failed: {}", e.code);
                }
                submitting.set(false);
            });
        }
    };

    let field = move |signal: RwSignal<String>, label: &'static str, kind: &'static str, autocomplete: &'static str| {
        let on_edit = on_edit.clone();
        view! {
            <label class="signup-page__field">
                <span>{label}</span>
                <input
                    type=kind
                    autocomplete=autocomplete
                    prop:value=move || signal.get()
                    on:input=move |ev| {
                        signal.set(event_target_value(&ev));
                        on_edit();
                    }
                />
            </label>
        }
    };

    view! {
        <div class="signup-page">
            <h1>"Create your account"</h1>

            <AuthErrorBanner/>

            <form class="signup-page__form" on:submit=on_submit>
                {field(display_name, "Display name (optional)", "text", "nickname")}
                {field(email, "Email", "email", "email")}
                {field(password, "Password", "password", "new-password")}
                {field(confirm, "Confirm password", "password", "new-password")}
                <p class="signup-page__note">{format!("At least {MIN_PASSWORD_LEN} characters.")}</p>
                {move || hint.get().map(|message| view! { <p class="signup-page__hint">{message}</p> })}
                <button class="btn btn--primary" type="submit" disabled=busy>
                    {move || if busy() { "Creating account..." } else { "Sign up" }}
                </button>
            </form>

            <p class="signup-page__footer">
                "Already registered? "
                <a href="/login">"Sign in"</a>
            </p>
        </div>
    }
}
