//! Route access decisions.
//!
//! Pure functions of the current `Session`; the client wraps them in
//! components that re-evaluate whenever the session signal changes.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::state::Session;

pub const LOGIN_ROUTE: &str = "/login";
pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    RedirectTo(&'static str),
    ShowLoading,
}

/// Gate for pages that need a signed-in user.
#[must_use]
pub fn require_authenticated(session: &Session) -> GuardOutcome {
    if session.is_loading() {
        GuardOutcome::ShowLoading
    } else if session.is_authenticated() {
        GuardOutcome::Render
    } else {
        GuardOutcome::RedirectTo(LOGIN_ROUTE)
    }
}

/// Gate for landing and auth pages: signed-in users go to the dashboard.
#[must_use]
pub fn require_anonymous(session: &Session) -> GuardOutcome {
    if session.is_loading() {
        GuardOutcome::ShowLoading
    } else if session.is_authenticated() {
        GuardOutcome::RedirectTo(DASHBOARD_ROUTE)
    } else {
        GuardOutcome::Render
    }
}
