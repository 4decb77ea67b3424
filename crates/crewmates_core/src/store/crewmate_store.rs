//! Crewmate store contract and REST-backed implementation.
//!
//! # Responsibility
//! - Define the table-scoped operations the record service depends on.
//! - Keep the REST query grammar out of service and hook code.
//!
//! # Invariants
//! - `list` returns rows ordered by `created_at` descending.
//! - `get`, `insert` and `update` resolve to exactly one row or fail.
//! - `delete` is idempotent: a missing row is indistinguishable from success.

use super::rest::{OrderDirection, RestClient};
use super::StoreResult;
use crate::model::crewmate::{Crewmate, CrewmateId, CrewmateUpdate, NewCrewmate};
use async_trait::async_trait;

pub(crate) const CREWMATES_TABLE: &str = "crewmates";

/// Table-scoped data access used by the record service.
///
/// Implementations own transport concerns; callers only see `StoreResult`.
#[async_trait]
pub trait CrewmateStore: Send + Sync {
    /// Returns all rows, newest first.
    async fn list(&self) -> StoreResult<Vec<Crewmate>>;

    /// Returns the single row with the given id.
    async fn get(&self, id: CrewmateId) -> StoreResult<Crewmate>;

    /// Inserts one row and returns the stored representation.
    async fn insert(&self, row: &NewCrewmate) -> StoreResult<Crewmate>;

    /// Applies a partial update and returns the updated row.
    async fn update(&self, id: CrewmateId, changes: &CrewmateUpdate) -> StoreResult<Crewmate>;

    /// Deletes the row with the given id, succeeding when it is absent.
    async fn delete(&self, id: CrewmateId) -> StoreResult<()>;
}

/// Production store backed by the hosted REST interface.
#[derive(Debug, Clone)]
pub struct RestCrewmateStore {
    client: RestClient,
}

impl RestCrewmateStore {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CrewmateStore for RestCrewmateStore {
    async fn list(&self) -> StoreResult<Vec<Crewmate>> {
        self.client
            .from(CREWMATES_TABLE)
            .select("*")
            .order("created_at", OrderDirection::Descending)
            .fetch()
            .await
    }

    async fn get(&self, id: CrewmateId) -> StoreResult<Crewmate> {
        self.client
            .from(CREWMATES_TABLE)
            .select("*")
            .eq("id", id)
            .single()
            .fetch()
            .await
    }

    async fn insert(&self, row: &NewCrewmate) -> StoreResult<Crewmate> {
        self.client
            .from(CREWMATES_TABLE)
            .select("*")
            .single()
            .insert(row)
            .await
    }

    async fn update(&self, id: CrewmateId, changes: &CrewmateUpdate) -> StoreResult<Crewmate> {
        self.client
            .from(CREWMATES_TABLE)
            .select("*")
            .eq("id", id)
            .single()
            .update(changes)
            .await
    }

    async fn delete(&self, id: CrewmateId) -> StoreResult<()> {
        self.client
            .from(CREWMATES_TABLE)
            .eq("id", id)
            .delete()
            .await
    }
}
