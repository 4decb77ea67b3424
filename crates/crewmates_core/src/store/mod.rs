//! Remote store access for the crewmates table.
//!
//! # Responsibility
//! - Define the data-access contract the service layer depends on.
//! - Keep the REST query grammar behind this boundary.
//!
//! # Invariants
//! - Constructing a client holds configuration only; no I/O happens before
//!   a terminal query operation.
//! - Store implementations return semantic errors (`RowNotFound`) in
//!   addition to transport errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod crewmate_store;
pub mod memory;
pub mod rest;

pub use crewmate_store::{CrewmateStore, RestCrewmateStore};
pub use memory::MemoryStore;
pub use rest::RestClient;

pub type StoreResult<T> = Result<T, StoreError>;

/// Fixed configuration for the hosted store endpoint.
///
/// The key is a static bearer credential; both values are deployment
/// configuration, not request-time state.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the REST interface, without a trailing slash.
    pub base_url: String,
    /// Static credential sent as both `apikey` and bearer token.
    pub api_key: String,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }
}

/// Failures raised by store implementations.
#[derive(Debug)]
pub enum StoreError {
    /// Network-level failure before an API response was obtained.
    Transport(reqwest::Error),
    /// Non-success API response with the backend's error message.
    Api { status: u16, message: String },
    /// Response body did not decode into the expected row shape.
    Decode(serde_json::Error),
    /// A single-row query matched no row (or more than one).
    RowNotFound,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Api { status, message } => write!(f, "store rejected request ({status}): {message}"),
            Self::Decode(err) => write!(f, "invalid row payload: {err}"),
            Self::RowNotFound => write!(f, "expected exactly one matching row, found none"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Api { .. } | Self::RowNotFound => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;

    #[test]
    fn config_strips_trailing_slashes() {
        let config = StoreConfig::new("https://example.supabase.co/", "key");
        assert_eq!(config.base_url, "https://example.supabase.co");
    }
}
