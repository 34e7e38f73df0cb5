//! Route table and navigation resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public routes (`/login`, `/register`, `/verify`) render without a session.
//! Everything under `/` is protected and goes through [`guard::guard`]. The
//! rendering layer matches on [`Navigation`] and draws the chosen view.

pub mod guard;

use crate::state::auth::SessionState;

pub use guard::{GuardDecision, LOGIN_PATH, guard, post_login_destination};

pub const DASHBOARD_PATH: &str = "/dashboard";

/// Every view the shell knows about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Verify { token: Option<String> },
    Index,
    Dashboard,
    Fields,
    Uploads,
    Devices,
    Alerts,
    Settings,
    NotFound,
}

impl Route {
    /// Parse a logical path, optionally with a query string.
    ///
    /// Trailing slashes are ignored. The only query parameter read is
    /// `token` on `/verify`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let path = path.trim_end_matches('/');

        match path {
            "" => Self::Index,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/verify" => Self::Verify { token: query_param(query, "token") },
            "/dashboard" => Self::Dashboard,
            "/fields" => Self::Fields,
            "/uploads" => Self::Uploads,
            "/devices" => Self::Devices,
            "/alerts" => Self::Alerts,
            "/settings" => Self::Settings,
            _ => Self::NotFound,
        }
    }

    /// Canonical path without query string.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Register => "/register",
            Self::Verify { .. } => "/verify",
            Self::Index => "/",
            Self::Dashboard => DASHBOARD_PATH,
            Self::Fields => "/fields",
            Self::Uploads => "/uploads",
            Self::Devices => "/devices",
            Self::Alerts => "/alerts",
            Self::Settings => "/settings",
            Self::NotFound => "*",
        }
    }

    #[must_use]
    pub fn is_protected(&self) -> bool {
        !matches!(self, Self::Login | Self::Register | Self::Verify { .. } | Self::NotFound)
    }
}

/// Outcome of resolving a path against the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Public view; no session required.
    Public(Route),
    /// Protected view; the guard decided.
    Protected(GuardDecision),
    NotFound,
}

/// Resolve `path` to what should be shown. `/` resolves to the dashboard
/// before the guard runs.
#[must_use]
pub fn navigate(state: &SessionState, path: &str) -> Navigation {
    let route = Route::parse(path);
    match route {
        Route::NotFound => Navigation::NotFound,
        Route::Index => Navigation::Protected(guard(state, DASHBOARD_PATH)),
        route if route.is_protected() => Navigation::Protected(guard(state, route.path())),
        route => Navigation::Public(route),
    }
}

fn query_param(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
