//! Data-access core for the Crewmates Gallery.
//! This crate is the single source of truth for how the UI reaches the
//! hosted crewmates table: store client, record service, read cache,
//! and notification side effects.

pub mod cache;
pub mod hooks;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;

pub use cache::{CacheKey, QueryCache};
pub use hooks::{CachedRead, CrewmateHooks};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::crewmate::{
    Crewmate, CrewmateId, CrewmateUpdate, CrewmateValidationError, NewCrewmate, COLOR_PALETTE,
};
pub use notify::{Notifier, Toast, ToastKind};
pub use service::{CrewmateService, NormalizedError, ServiceResult, DB_ERROR_MESSAGE};
pub use store::{
    CrewmateStore, MemoryStore, RestClient, RestCrewmateStore, StoreConfig, StoreError,
    StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
