//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::route_guard::{RequireAuth, RequireGuest};
use crate::pages::{dashboard::DashboardPage, login::LoginPage, signup::SignupPage};
use crate::state::session::SessionStore;

/// Root application component.
///
/// Provides the session store to every route and releases its session
/// subscription when the application is torn down.
#[component]
pub fn App(store: SessionStore) -> impl IntoView {
    provide_meta_context();

    provide_context(store.clone());
    on_cleanup(move || store.teardown());

    view! {
        <Title text="Taskdeck"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/dashboard"/> }/>
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <RequireGuest><LoginPage/></RequireGuest> }
                />
                <Route
                    path=StaticSegment("signup")
                    view=|| view! { <RequireGuest><SignupPage/></RequireGuest> }
                />
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <RequireAuth><DashboardPage/></RequireAuth> }
                />
                <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=OAuthCallbackPage/>
            </Routes>
        </Router>
    }
}

/// Landing page for the Google popup redirect. The opener reads the
/// fragment and closes the window.
#[component]
fn OAuthCallbackPage() -> impl IntoView {
    view! {
        <div class="auth-loading" role="status">
            <p>"Completing sign-in..."</p>
        </div>
    }
}
