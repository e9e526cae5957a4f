//! # taskdeck
//!
//! Leptos + WASM single-page client for a task dashboard with email/password
//! and Google popup sign-in against a hosted identity platform.
//!
//! The auth core (`net`, `state`, `util`) is plain Rust and runs natively in
//! tests; browser-only plumbing (HTTP, `localStorage`, popups) sits behind
//! the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: wire the identity backend, restore any persisted
/// session, and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use std::sync::Arc;

    use leptos::prelude::*;

    use crate::app::App;
    use crate::config::IdentityConfig;
    use crate::net::firebase::FirebaseBackend;
    use crate::net::gateway::AuthGateway;
    use crate::net::identity::IdentityBackend;
    use crate::state::session::SessionStore;

    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger not installed: {e}");
    }

    let config = match IdentityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("identity configuration invalid: {e}");
            let message = e.to_string();
            leptos::mount::mount_to_body(move || {
                view! {
                    <div class="config-error" role="alert">
                        <h1>"Taskdeck is not configured"</h1>
                        <p>{message.clone()}</p>
                    </div>
                }
            });
            return;
        }
    };

    let backend = Arc::new(FirebaseBackend::new(config));
    let store = SessionStore::new(AuthGateway::new(backend.clone() as Arc<dyn IdentityBackend>));

    leptos::task::spawn_local(async move { backend.restore().await });

    leptos::mount::mount_to_body(move || view! { <App store=store.clone()/> });
}
