//! Session domain types shared by the store, the backend, and the pages.
//!
//! DESIGN
//! ======
//! `AuthBackend` is the request/response seam behind every session-establishing
//! operation. The store only sees `Result<Identity, AuthError>`, so tests can
//! script any outcome without touching timers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// ROLE
// =============================================================================

/// Role tag carried by every identity. Display-only; nothing enforces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Farmer,
    #[serde(rename = "FPO Manager")]
    FpoManager,
    Agronomist,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Farmer, Role::FpoManager, Role::Agronomist];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Farmer => "Farmer",
            Self::FpoManager => "FPO Manager",
            Self::Agronomist => "Agronomist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s.trim())
            .ok_or_else(|| AuthError::Validation { field: "role", reason: format!("unknown role '{s}'") })
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// The signed-in principal. Replaced wholesale on every re-login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque identifier assigned by the backend.
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub organization: Option<String>,
}

impl Identity {
    /// Identity installed when a persisted marker is found at start-up.
    /// No re-authentication happens; the marker is only a "signed in before" flag.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: "1".into(),
            name: "John Farmer".into(),
            email: "john@farm.com".into(),
            role: Role::Farmer,
            organization: Some("Green Valley Farm".into()),
        }
    }

    /// Upper-cased first character of the display name, for avatar fallbacks.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.name.trim().chars().next().map(|c| c.to_ascii_uppercase())
    }
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// Profile submitted by the sign-up form.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub secret: String,
    pub role: Role,
    pub organization: Option<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("secret", &"<redacted>")
            .field("role", &self.role)
            .field("organization", &self.organization)
            .finish()
    }
}

impl Registration {
    /// Build the identity for a newly created account. The secret is dropped here.
    #[must_use]
    pub fn into_identity(self, id: String) -> Identity {
        Identity { id, name: self.name, email: self.email, role: self.role, organization: self.organization }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Typed failure for a single session operation.
///
/// Failures never touch the current identity; the store returns `busy` to
/// `false` and hands the error back to the caller, which may retry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("sign-in link expired or invalid")]
    LinkExpiredOrInvalid,

    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("another session operation is already in progress")]
    Busy,
}

impl AuthError {
    pub(crate) fn required(field: &'static str) -> Self {
        Self::Validation { field, reason: "must not be empty".into() }
    }

    /// Grepable code for logs and UI error mapping.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "E_INVALID_CREDENTIALS",
            Self::LinkExpiredOrInvalid => "E_LINK_INVALID",
            Self::NetworkUnavailable(_) => "E_NETWORK_UNAVAILABLE",
            Self::Validation { .. } => "E_VALIDATION",
            Self::Busy => "E_BUSY",
        }
    }

    /// Whether re-invoking the same operation unchanged can succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::NetworkUnavailable(_) | Self::Busy)
    }
}

// =============================================================================
// BACKEND TRAIT
// =============================================================================

/// Remote side of the session operations.
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange email and secret for an identity.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] on rejection, or
    /// [`AuthError::NetworkUnavailable`] when the request cannot be made.
    async fn login(&self, email: &str, secret: &str) -> Result<Identity, AuthError>;

    /// Send a one-time sign-in link to `email`.
    ///
    /// # Errors
    ///
    /// [`AuthError::NetworkUnavailable`] when delivery cannot be requested.
    async fn send_link(&self, email: &str) -> Result<(), AuthError>;

    /// Create an account and return its identity.
    ///
    /// # Errors
    ///
    /// Any [`AuthError`] the remote side reports.
    async fn register(&self, registration: &Registration) -> Result<Identity, AuthError>;

    /// Exchange a one-time link token for an identity.
    ///
    /// # Errors
    ///
    /// [`AuthError::LinkExpiredOrInvalid`] when the token is rejected.
    async fn verify_link(&self, token: &str) -> Result<Identity, AuthError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
