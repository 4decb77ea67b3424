//! Domain model for the crewmates table.
//!
//! # Responsibility
//! - Define the canonical record shape plus the insert/update payloads.
//! - Keep field-level invariants checkable before any store round-trip.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `CrewmateId`.
//! - `created_at` is assigned once and never rewritten by this layer.

pub mod crewmate;
