//! Crewmate record service.
//!
//! # Responsibility
//! - Provide the five record operations over any [`CrewmateStore`].
//! - Act as the single boundary where failures become uniform values.
//!
//! # Invariants
//! - Every operation resolves with a `ServiceResult`; no store error and no
//!   panic escapes to callers.
//! - Field invariants are checked before any store round-trip, so invalid
//!   payloads never reach the backend.

use super::{normalize_error, ServiceResult};
use crate::model::crewmate::{Crewmate, CrewmateId, CrewmateUpdate, NewCrewmate};
use crate::store::CrewmateStore;

/// Record service over a concrete store implementation.
pub struct CrewmateService<S: CrewmateStore> {
    store: S,
}

impl<S: CrewmateStore> CrewmateService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists all crewmates, newest first.
    pub async fn list_crewmates(&self) -> ServiceResult<Vec<Crewmate>> {
        self.store
            .list()
            .await
            .map_err(|err| normalize_error(&err))
    }

    /// Gets one crewmate by id.
    ///
    /// # Contract
    /// - Zero matching rows is a failure, not an empty success.
    pub async fn get_crewmate(&self, id: CrewmateId) -> ServiceResult<Crewmate> {
        self.store
            .get(id)
            .await
            .map_err(|err| normalize_error(&err))
    }

    /// Creates a crewmate and returns the stored row.
    ///
    /// # Contract
    /// - The payload is validated first; violations never reach the store.
    /// - The returned row carries the store-assigned `id` and `created_at`.
    pub async fn create_crewmate(&self, crewmate: &NewCrewmate) -> ServiceResult<Crewmate> {
        if let Err(err) = crewmate.validate() {
            return Err(normalize_error(&err));
        }
        self.store
            .insert(crewmate)
            .await
            .map_err(|err| normalize_error(&err))
    }

    /// Applies a partial update and returns the updated row.
    ///
    /// # Contract
    /// - Unset fields are left untouched in the store.
    /// - A missing row is a failure.
    pub async fn update_crewmate(
        &self,
        id: CrewmateId,
        changes: &CrewmateUpdate,
    ) -> ServiceResult<Crewmate> {
        if let Err(err) = changes.validate() {
            return Err(normalize_error(&err));
        }
        self.store
            .update(id, changes)
            .await
            .map_err(|err| normalize_error(&err))
    }

    /// Deletes a crewmate by id.
    ///
    /// # Contract
    /// - `Ok(())` is the success case; a row that was already absent is
    ///   reported as success, matching the store's idempotent delete.
    pub async fn delete_crewmate(&self, id: CrewmateId) -> ServiceResult<()> {
        self.store
            .delete(id)
            .await
            .map_err(|err| normalize_error(&err))
    }
}
