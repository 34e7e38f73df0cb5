//! Shell configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::net::api::DEFAULT_LATENCY;

pub const DEFAULT_STORAGE_PATH: &str = ".agri-shell/storage.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got '{value}'")]
    InvalidLatency { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    EmptyPath { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// File backing the persisted session marker.
    pub storage_path: PathBuf,
    /// Latency of the simulated auth API.
    pub auth_latency: Duration,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self { storage_path: PathBuf::from(DEFAULT_STORAGE_PATH), auth_latency: DEFAULT_LATENCY }
    }
}

impl ShellConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `AGRI_STORAGE_PATH`: default `.agri-shell/storage.json`
    /// - `AGRI_AUTH_LATENCY_MS`: default 1000
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_path = match lookup("AGRI_STORAGE_PATH") {
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyPath { var: "AGRI_STORAGE_PATH" }),
            Some(raw) => PathBuf::from(raw.trim()),
            None => PathBuf::from(DEFAULT_STORAGE_PATH),
        };

        let auth_latency = match lookup("AGRI_AUTH_LATENCY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidLatency { var: "AGRI_AUTH_LATENCY_MS", value: raw })?,
            None => DEFAULT_LATENCY,
        };

        Ok(Self { storage_path, auth_latency })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
