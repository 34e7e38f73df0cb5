//! Access decision for protected views.
//!
//! Owns no state; the decision is a function of the session snapshot and
//! the requested path.

use super::{DASHBOARD_PATH, Route};
use crate::state::auth::SessionState;

pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session check still running. Show a neutral placeholder.
    Loading,
    /// Not signed in. `from` is restored after a successful login.
    Redirect { to: &'static str, from: String },
    Render(String),
}

#[must_use]
pub fn guard(state: &SessionState, requested: &str) -> GuardDecision {
    if state.busy {
        return GuardDecision::Loading;
    }
    if state.identity.is_none() {
        tracing::debug!(%requested, "unauthenticated, redirecting to login");
        return GuardDecision::Redirect { to: LOGIN_PATH, from: requested.to_owned() };
    }
    GuardDecision::Render(requested.to_owned())
}

/// Where to go after signing in. Falls back to the dashboard unless `from`
/// names a protected view, so a login never lands back on a public page.
#[must_use]
pub fn post_login_destination(from: Option<&str>) -> &'static str {
    match from.map(Route::parse) {
        Some(Route::Index) | None => DASHBOARD_PATH,
        Some(route) if route.is_protected() => route.path(),
        Some(_) => DASHBOARD_PATH,
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;
