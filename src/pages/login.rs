//! Sign-in page: email + secret form, and the sign-in link alternative.

use super::Toast;
use crate::net::types::AuthError;
use crate::routes::post_login_destination;
use crate::state::auth::{SessionState, SessionStore};

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub secret: String,
    /// Set once a link was requested; the page then shows "check your email".
    pub link_sent: bool,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { email: email.into(), secret: secret.into(), link_sent: false }
    }

    /// Submit button state. False while any session operation is in flight.
    #[must_use]
    pub fn can_submit(&self, state: &SessionState) -> bool {
        !state.busy && !self.email.trim().is_empty() && !self.secret.is_empty()
    }

    #[must_use]
    pub fn can_send_link(&self, state: &SessionState) -> bool {
        !state.busy && !self.email.trim().is_empty()
    }

    /// Sign in and return where to navigate: `from` when it was a protected
    /// view, else the dashboard.
    ///
    /// # Errors
    ///
    /// Whatever [`SessionStore::login`] returns.
    pub async fn submit(&self, store: &SessionStore, from: Option<&str>) -> Result<&'static str, AuthError> {
        store.login(&self.email, &self.secret).await?;
        Ok(post_login_destination(from))
    }

    /// Request a sign-in link for the entered email.
    ///
    /// # Errors
    ///
    /// Whatever [`SessionStore::login_with_link`] returns.
    pub async fn send_link(&mut self, store: &SessionStore) -> Result<(), AuthError> {
        store.login_with_link(&self.email).await?;
        self.link_sent = true;
        Ok(())
    }

    /// Back from the "check your email" panel to the form.
    pub fn reset_link(&mut self) {
        self.link_sent = false;
    }
}

#[must_use]
pub fn submit_toast<T>(result: &Result<T, AuthError>) -> Toast {
    match result {
        Ok(_) => Toast::info("Welcome back!", "You've successfully signed in."),
        Err(_) => Toast::error("Sign in failed", "Please check your credentials and try again."),
    }
}

#[must_use]
pub fn link_toast(result: &Result<(), AuthError>) -> Toast {
    match result {
        Ok(()) => Toast::info("Magic link sent!", "Check your email for a sign-in link."),
        Err(_) => Toast::error("Failed to send magic link", "Please try again later."),
    }
}

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;
