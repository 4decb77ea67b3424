//! Data-binding layer between UI surfaces and the record service.
//!
//! # Responsibility
//! - Serve reads through the keyed cache with de-duplication.
//! - Run mutations as one-shot actions with cache invalidation and
//!   notification side effects.
//!
//! # Invariants
//! - Reads degrade to an empty value on failure; errors never propagate
//!   past this layer as anything but toasts.
//! - A failed mutation leaves the cache exactly as it was.

pub mod crewmate_hooks;

pub use crewmate_hooks::{CachedRead, CrewmateHooks};
