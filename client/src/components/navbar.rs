//! Top navigation bar.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::use_session;
use crate::util::nav::navigation_request;

#[component]
pub fn Navbar() -> impl IntoView {
    let handle = use_session();
    let session = handle.session;
    let go_to = navigation_request();

    let coordinator = handle.coordinator.clone();
    let on_logout = move |_| {
        let coordinator = coordinator.clone();
        leptos::task::spawn_local(async move {
            match coordinator.logout().await {
                Ok(()) => go_to.set(Some("/".to_owned())),
                Err(e) => log::error!("logout error: {e}"),
            }
        });
    };

    let greeting = move || {
        session
            .get()
            .identity
            .map(|user| format!("Welcome, {}!", user.greeting_name()))
            .unwrap_or_default()
    };

    view! {
        <nav class="navbar">
            <A href="/" attr:class="navbar__brand">
                "✈ Travel Companion"
            </A>
            <div class="navbar__links">
                <Show
                    when=move || session.get().is_authenticated()
                    fallback=|| {
                        view! {
                            <A href="/login" attr:class="navbar__link">"Sign In"</A>
                            <A href="/register" attr:class="navbar__link">"Sign Up"</A>
                        }
                    }
                >
                    <A href="/dashboard" attr:class="navbar__link">"Dashboard"</A>
                    <A href="/trips/new" attr:class="navbar__link">"+ New Trip"</A>
                    <span class="navbar__greeting">{greeting}</span>
                    <button class="btn btn--outline navbar__logout" on:click=on_logout.clone()>
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
