//! Route guard components.
//!
//! Both guards re-run their decision whenever the session signal changes, so
//! a login or logout elsewhere in the app moves the user immediately.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use session::Session;
use session::guard::{GuardOutcome, require_anonymous, require_authenticated};

use crate::state::auth::use_session;

/// Full-height spinner shown while the initial identity check runs.
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="spinner" role="status">
                <span class="visually-hidden">"Loading..."</span>
            </div>
        </div>
    }
}

fn guarded(decide: fn(&Session) -> GuardOutcome, children: ChildrenFn) -> impl IntoView {
    let handle = use_session();
    move || match decide(&handle.session.get()) {
        GuardOutcome::Render => children().into_any(),
        GuardOutcome::RedirectTo(path) => view! { <Redirect path=path/> }.into_any(),
        GuardOutcome::ShowLoading => view! { <LoadingScreen/> }.into_any(),
    }
}

/// Renders children only for a signed-in user; otherwise sends to `/login`.
#[component]
pub fn RequireAuthenticated(children: ChildrenFn) -> impl IntoView {
    guarded(require_authenticated, children)
}

/// Renders children only when signed out; otherwise sends to `/dashboard`.
#[component]
pub fn RequireAnonymous(children: ChildrenFn) -> impl IntoView {
    guarded(require_anonymous, children)
}
