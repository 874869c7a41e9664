//! Root application component with routing and the session context.
//!
//! ARCHITECTURE
//! ============
//! `App` installs the session handle before the router so every route and
//! the navbar read the same signal. Public routes sit behind
//! `RequireAnonymous`, trip routes behind `RequireAuthenticated`.
//! `/trips/new` is declared before `/trips/:id` so "new" is never taken as
//! an id. The auth modal is mounted beside the routes so a guard redirect
//! does not unmount it mid-submit.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};
use session::form::AuthMode;

use crate::components::auth_modal::{AuthDialog, AuthModal};
use crate::components::guard::{RequireAnonymous, RequireAuthenticated};
use crate::components::navbar::Navbar;
use crate::pages::{
    dashboard::DashboardPage, landing::LandingPage, trip_detail::TripDetailPage, trip_form::TripFormPage,
};
use crate::state::auth::SessionHandle;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    SessionHandle::install();
    AuthDialog::provide();

    view! {
        <Stylesheet id="leptos" href="/pkg/travel-companion.css"/>
        <Title text="Travel Companion"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| view! { <Redirect path="/"/> }>
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <RequireAnonymous><LandingPage/></RequireAnonymous> }
                    />
                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <RequireAnonymous><LandingPage mode=AuthMode::Login/></RequireAnonymous> }
                    />
                    <Route
                        path=StaticSegment("register")
                        view=|| view! { <RequireAnonymous><LandingPage mode=AuthMode::Signup/></RequireAnonymous> }
                    />
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <RequireAuthenticated><DashboardPage/></RequireAuthenticated> }
                    />
                    <Route
                        path=(StaticSegment("trips"), StaticSegment("new"))
                        view=|| view! { <RequireAuthenticated><TripFormPage/></RequireAuthenticated> }
                    />
                    <Route
                        path=(StaticSegment("trips"), ParamSegment("id"))
                        view=|| view! { <RequireAuthenticated><TripDetailPage/></RequireAuthenticated> }
                    />
                    <Route
                        path=(StaticSegment("trips"), ParamSegment("id"), StaticSegment("edit"))
                        view=|| view! { <RequireAuthenticated><TripFormPage/></RequireAuthenticated> }
                    />
                </Routes>
            </main>
            <AuthModal/>
        </Router>
    }
}
