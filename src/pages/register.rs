//! Sign-up page: profile form with a password strength meter.
//!
//! Strength is scored in four 25-point steps. The form refuses to submit
//! below 75, before the session store is ever called.

use super::Toast;
use crate::net::types::{AuthError, Registration, Role};
use crate::routes::DASHBOARD_PATH;
use crate::state::auth::{SessionState, SessionStore};

pub const MIN_SECRET_LEN: usize = 8;
pub const REQUIRED_STRENGTH: u8 = 75;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Fair,
    Strong,
}

impl Strength {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            0..50 => Self::Weak,
            50..75 => Self::Fair,
            _ => Self::Strong,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Requirement {
    pub text: &'static str,
    pub met: bool,
}

#[must_use]
pub fn password_requirements(secret: &str) -> [Requirement; 4] {
    [
        Requirement { text: "At least 8 characters", met: secret.chars().count() >= MIN_SECRET_LEN },
        Requirement { text: "Contains lowercase letter", met: secret.chars().any(|c| c.is_ascii_lowercase()) },
        Requirement { text: "Contains uppercase letter", met: secret.chars().any(|c| c.is_ascii_uppercase()) },
        Requirement { text: "Contains number or symbol", met: secret.chars().any(|c| !c.is_ascii_alphabetic()) },
    ]
}

/// 0, 25, 50, 75 or 100.
#[must_use]
pub fn password_strength(secret: &str) -> u8 {
    let met = password_requirements(secret).iter().filter(|r| r.met).count();
    u8::try_from(met * 25).unwrap_or(100)
}

#[derive(Clone, Debug, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub secret: String,
    pub role: Option<Role>,
    pub organization: String,
}

impl RegisterForm {
    #[must_use]
    pub fn strength(&self) -> Strength {
        Strength::from_score(password_strength(&self.secret))
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && self.role.is_some()
            && password_strength(&self.secret) >= REQUIRED_STRENGTH
    }

    #[must_use]
    pub fn can_submit(&self, state: &SessionState) -> bool {
        !state.busy && self.is_valid()
    }

    /// Build the registration. An empty organization becomes `None`.
    ///
    /// # Errors
    ///
    /// `Validation` for a weak secret or a missing role.
    pub fn to_registration(&self) -> Result<Registration, AuthError> {
        if password_strength(&self.secret) < REQUIRED_STRENGTH {
            return Err(AuthError::Validation { field: "secret", reason: "password too weak".into() });
        }
        let role = self
            .role
            .ok_or_else(|| AuthError::Validation { field: "role", reason: "must be selected".into() })?;
        let organization = Some(self.organization.trim())
            .filter(|o| !o.is_empty())
            .map(str::to_owned);

        Ok(Registration {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            secret: self.secret.clone(),
            role,
            organization,
        })
    }

    /// Register and return the dashboard path.
    ///
    /// # Errors
    ///
    /// Form validation errors, or whatever [`SessionStore::register`] returns.
    pub async fn submit(&self, store: &SessionStore) -> Result<&'static str, AuthError> {
        let registration = self.to_registration()?;
        store.register(registration).await?;
        Ok(DASHBOARD_PATH)
    }
}

#[must_use]
pub fn submit_toast<T>(result: &Result<T, AuthError>) -> Toast {
    match result {
        Ok(_) => Toast::info("Account created successfully!", "Welcome to AgriAI Platform."),
        Err(AuthError::Validation { field: "secret", .. }) => {
            Toast::error("Password too weak", "Please choose a stronger password.")
        }
        Err(_) => Toast::error("Registration failed", "Please try again later."),
    }
}

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;
