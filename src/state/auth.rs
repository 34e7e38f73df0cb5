//! Session store: current identity, busy flag, and the lifecycle operations.
//!
//! DESIGN
//! ======
//! Every change goes through the pure `SessionState::apply`. `SessionStore`
//! is the single access point that runs those transitions and publishes the
//! result on a `watch` channel, so the rendering layer re-reads `{identity,
//! busy}` whenever it changes. The store is cloned into consumers; there is
//! no global instance.
//!
//! CONCURRENCY
//! ===========
//! One async operation at a time. Starting an operation while `busy` is set
//! fails fast with `AuthError::Busy`; the busy check and the `Started`
//! transition happen inside a single `send_if_modified`, so two callers
//! cannot both get through. Started operations always settle: there is no
//! cancellation and no timeout. `logout` is synchronous and does not wait
//! for an in-flight operation, which still applies its result afterwards.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::net::types::{AuthBackend, AuthError, Identity, Registration};
use crate::util::storage::{MARKER_KEY, MarkerStorage, generate_marker};

// =============================================================================
// STATE
// =============================================================================

/// What the UI reads: who is signed in, and whether an operation is running.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub busy: bool,
}

/// Input to [`SessionState::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// An operation began.
    Started,
    /// An operation produced a new identity.
    Established(Identity),
    /// An operation finished without changing the identity.
    Settled,
    /// Start-up check finished.
    Restored(Option<Identity>),
    /// Identity cleared. Busy is left as is.
    LoggedOut,
}

impl SessionState {
    /// State before the start-up check has run.
    #[must_use]
    pub fn starting() -> Self {
        Self { identity: None, busy: true }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub fn apply(self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::Started => Self { busy: true, ..self },
            SessionEvent::Established(identity) => Self { identity: Some(identity), busy: false },
            SessionEvent::Settled => Self { busy: false, ..self },
            SessionEvent::Restored(identity) => Self { identity, busy: false },
            SessionEvent::LoggedOut => Self { identity: None, ..self },
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    backend: Arc<dyn AuthBackend>,
    storage: Arc<dyn MarkerStorage>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Build a store in the [`SessionState::starting`] state. Call
    /// [`SessionStore::initialize`] once before serving routes.
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>, storage: Arc<dyn MarkerStorage>) -> Self {
        let (state, _) = watch::channel(SessionState::starting());
        Self { inner: Arc::new(SessionStoreInner { backend, storage, state }) }
    }

    /// Current state, cloned.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Start-up check: a persisted marker restores the placeholder identity.
    /// No backend call is made. Only the first call on a new store has any
    /// effect; later calls are ignored.
    pub fn initialize(&self) {
        if *self.inner.state.borrow() != SessionState::starting() {
            tracing::debug!("session already initialized");
            return;
        }

        let restored = match self.inner.storage.get_item(MARKER_KEY) {
            Ok(Some(marker)) if !marker.is_empty() => Some(Identity::placeholder()),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "session marker unreadable, starting signed out");
                None
            }
        };

        tracing::info!(restored = restored.is_some(), "session initialized");
        self.transition(SessionEvent::Restored(restored));
    }

    /// Sign in with email and secret.
    ///
    /// # Errors
    ///
    /// `Validation` if either field is empty, `Busy` if another operation is
    /// running, or whatever the backend rejects with. The session is left
    /// unchanged on every error.
    pub async fn login(&self, email: &str, secret: &str) -> Result<Identity, AuthError> {
        let email = require("email", email)?;
        require_secret(secret)?;

        self.begin("login")?;
        let outcome = self.inner.backend.login(email, secret).await;
        self.establish("login", outcome)
    }

    /// Ask the backend to send a one-time sign-in link. Never changes the
    /// identity; the follow-up is [`SessionStore::verify_link`].
    ///
    /// # Errors
    ///
    /// `Validation` for an empty email, `Busy`, or the backend's failure.
    pub async fn login_with_link(&self, email: &str) -> Result<(), AuthError> {
        let email = require("email", email)?;

        self.begin("login_with_link")?;
        let outcome = self.inner.backend.send_link(email).await;
        self.transition(SessionEvent::Settled);

        match outcome {
            Ok(()) => {
                tracing::info!(%email, "sign-in link requested");
                Ok(())
            }
            Err(e) => Err(failed("login_with_link", e)),
        }
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// `Validation` if name, email or secret is empty, `Busy`, or the
    /// backend's failure. Name and email are trimmed before they are sent.
    pub async fn register(&self, mut registration: Registration) -> Result<Identity, AuthError> {
        registration.name = require("name", &registration.name)?.to_owned();
        registration.email = require("email", &registration.email)?.to_owned();
        require_secret(&registration.secret)?;

        self.begin("register")?;
        let outcome = self.inner.backend.register(&registration).await;
        self.establish("register", outcome)
    }

    /// Exchange a sign-in link token for a session. The token is passed to
    /// the backend untouched.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty token, `Busy`, or the backend's failure.
    pub async fn verify_link(&self, token: &str) -> Result<Identity, AuthError> {
        require("token", token)?;

        self.begin("verify_link")?;
        let outcome = self.inner.backend.verify_link(token).await;
        self.establish("verify_link", outcome)
    }

    /// Clear the identity and the persisted marker.
    pub fn logout(&self) {
        if let Err(e) = self.inner.storage.remove_item(MARKER_KEY) {
            tracing::warn!(error = %e, "failed to delete session marker");
        }
        self.transition(SessionEvent::LoggedOut);
        tracing::info!("signed out");
    }

    fn transition(&self, event: SessionEvent) {
        self.inner.state.send_modify(|state| {
            *state = std::mem::take(state).apply(event);
        });
    }

    fn begin(&self, op: &'static str) -> Result<(), AuthError> {
        let started = self.inner.state.send_if_modified(|state| {
            if state.busy {
                return false;
            }
            *state = std::mem::take(state).apply(SessionEvent::Started);
            true
        });

        if started {
            tracing::debug!(op, "session operation started");
            Ok(())
        } else {
            tracing::warn!(op, "rejected: another session operation is in flight");
            Err(AuthError::Busy)
        }
    }

    fn establish(&self, op: &'static str, outcome: Result<Identity, AuthError>) -> Result<Identity, AuthError> {
        match outcome {
            Ok(identity) => {
                if let Err(e) = self.inner.storage.set_item(MARKER_KEY, &generate_marker()) {
                    tracing::warn!(op, error = %e, "failed to write session marker");
                }
                self.transition(SessionEvent::Established(identity.clone()));
                tracing::info!(op, email = %identity.email, role = %identity.role, "session established");
                Ok(identity)
            }
            Err(e) => {
                self.transition(SessionEvent::Settled);
                Err(failed(op, e))
            }
        }
    }
}

fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::required(field));
    }
    Ok(trimmed)
}

/// Secrets are taken verbatim; only an empty one is refused.
fn require_secret(secret: &str) -> Result<(), AuthError> {
    if secret.is_empty() {
        return Err(AuthError::required("secret"));
    }
    Ok(())
}

fn failed(op: &'static str, e: AuthError) -> AuthError {
    tracing::warn!(op, code = e.error_code(), error = %e, "session operation failed");
    e
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;
