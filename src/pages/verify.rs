//! Sign-in link landing page (`/verify?token=...`).
//!
//! A missing or empty token fails the page immediately; the store is only
//! called with a non-empty token.

use super::Toast;
use crate::net::types::AuthError;
use crate::routes::DASHBOARD_PATH;
use crate::state::auth::SessionStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerifyStatus {
    #[default]
    Loading,
    Success,
    Error,
}

#[derive(Clone, Debug, Default)]
pub struct VerifyPage {
    status: VerifyStatus,
}

impl VerifyPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> VerifyStatus {
        self.status
    }

    /// Verify `token` and return the redirect target on success.
    ///
    /// # Errors
    ///
    /// `Validation` for a missing token (store not called), otherwise
    /// whatever [`SessionStore::verify_link`] returns.
    pub async fn run(&mut self, store: &SessionStore, token: Option<&str>) -> Result<&'static str, AuthError> {
        self.status = VerifyStatus::Loading;

        let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
            tracing::warn!("sign-in link opened without a token");
            self.status = VerifyStatus::Error;
            return Err(AuthError::required("token"));
        };

        match store.verify_link(token).await {
            Ok(_) => {
                self.status = VerifyStatus::Success;
                Ok(DASHBOARD_PATH)
            }
            Err(e) => {
                self.status = VerifyStatus::Error;
                Err(e)
            }
        }
    }
}

#[must_use]
pub fn verify_toast<T>(result: &Result<T, AuthError>) -> Toast {
    match result {
        Ok(_) => Toast::info("Successfully signed in!", "Welcome to AgriAI Platform."),
        Err(_) => Toast::error("Verification failed", "The magic link may have expired or is invalid."),
    }
}

#[cfg(test)]
#[path = "verify_test.rs"]
mod verify_test;
