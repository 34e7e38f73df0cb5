//! Simulated auth API.
//!
//! Stands in for the real auth service until one exists: every call waits a
//! fixed latency and then succeeds with canned data. Nothing is validated
//! here; input constraints are enforced by the session store.

use std::time::Duration;

use uuid::Uuid;

use super::types::{AuthBackend, AuthError, Identity, Registration, Role};

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

#[derive(Clone, Debug)]
pub struct SimulatedAuthApi {
    latency: Duration,
}

impl Default for SimulatedAuthApi {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl SimulatedAuthApi {
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait::async_trait]
impl AuthBackend for SimulatedAuthApi {
    async fn login(&self, email: &str, _secret: &str) -> Result<Identity, AuthError> {
        self.round_trip().await;
        Ok(Identity {
            id: "1".into(),
            name: "John Farmer".into(),
            email: email.to_owned(),
            role: Role::Farmer,
            organization: Some("Green Valley Farm".into()),
        })
    }

    async fn send_link(&self, email: &str) -> Result<(), AuthError> {
        self.round_trip().await;
        tracing::debug!(%email, "simulated sign-in link dispatched");
        Ok(())
    }

    async fn register(&self, registration: &Registration) -> Result<Identity, AuthError> {
        self.round_trip().await;
        Ok(registration.clone().into_identity(Uuid::new_v4().to_string()))
    }

    async fn verify_link(&self, _token: &str) -> Result<Identity, AuthError> {
        self.round_trip().await;
        Ok(Identity::placeholder())
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
