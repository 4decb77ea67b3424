//! Crewmate data-binding hooks.
//!
//! # Responsibility
//! - Expose the five UI-facing operations over service + cache + notifier.
//! - Keep the invalidation sets per mutation explicit and minimal.
//!
//! # Invariants
//! - List reads are keyed by `CacheKey::List`, detail reads by
//!   `CacheKey::Detail(id)`; concurrent reads per key share one request.
//! - A detail read without an id is disabled and never executes.
//! - Mutations always resolve with the uniform service result, success or
//!   not, so callers can branch for navigation flow.

use crate::cache::{CacheKey, QueryCache};
use crate::model::crewmate::{Crewmate, CrewmateId, CrewmateUpdate, NewCrewmate};
use crate::notify::Notifier;
use crate::service::{CrewmateService, ServiceResult};
use crate::store::CrewmateStore;
use std::sync::Arc;

/// Value shape stored in the read cache.
///
/// Degraded fallbacks (empty list, absent detail) are cached like any other
/// read result; invalidation is what refreshes them.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedRead {
    List(Vec<Crewmate>),
    Detail(Option<Crewmate>),
}

/// UI-facing operations over one crewmate service.
///
/// Cloning shares the cache and notifier, mirroring how every mounted view
/// consumes the same client-side query state.
pub struct CrewmateHooks<S: CrewmateStore> {
    service: Arc<CrewmateService<S>>,
    cache: Arc<QueryCache<CachedRead>>,
    notifier: Notifier,
}

impl<S: CrewmateStore> Clone for CrewmateHooks<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            cache: Arc::clone(&self.cache),
            notifier: self.notifier.clone(),
        }
    }
}

impl<S: CrewmateStore + 'static> CrewmateHooks<S> {
    pub fn new(service: CrewmateService<S>, notifier: Notifier) -> Self {
        Self {
            service: Arc::new(service),
            cache: Arc::new(QueryCache::new()),
            notifier,
        }
    }

    /// Handle for subscribing to the toasts this layer emits.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Cached list read.
    ///
    /// On failure: destructive toast, degrades to an empty list.
    pub async fn get_crewmates(&self) -> Vec<Crewmate> {
        let service = Arc::clone(&self.service);
        let notifier = self.notifier.clone();
        let read = self
            .cache
            .get_or_fetch(CacheKey::List, move || async move {
                match service.list_crewmates().await {
                    Ok(rows) => CachedRead::List(rows),
                    Err(err) => {
                        notifier.destructive("Error fetching crewmates", err.message);
                        CachedRead::List(Vec::new())
                    }
                }
            })
            .await;

        match read {
            CachedRead::List(rows) => rows,
            CachedRead::Detail(_) => Vec::new(),
        }
    }

    /// Cached detail read, disabled when no id is supplied.
    ///
    /// On failure: destructive toast, degrades to `None`.
    pub async fn get_crewmate(&self, id: Option<CrewmateId>) -> Option<Crewmate> {
        let id = id?;
        let service = Arc::clone(&self.service);
        let notifier = self.notifier.clone();
        let read = self
            .cache
            .get_or_fetch(CacheKey::Detail(id), move || async move {
                match service.get_crewmate(id).await {
                    Ok(row) => CachedRead::Detail(Some(row)),
                    Err(err) => {
                        notifier.destructive("Error fetching crewmate", err.message);
                        CachedRead::Detail(None)
                    }
                }
            })
            .await;

        match read {
            CachedRead::Detail(row) => row,
            CachedRead::List(_) => None,
        }
    }

    /// One-shot create. Success invalidates the list key.
    pub async fn create_crewmate(&self, crewmate: NewCrewmate) -> ServiceResult<Crewmate> {
        let result = self.service.create_crewmate(&crewmate).await;
        match &result {
            Ok(_) => {
                self.cache.invalidate(&[CacheKey::List]);
                self.notifier
                    .success("Success!", "Crewmate created successfully.");
            }
            Err(err) => {
                self.notifier
                    .destructive("Error creating crewmate", err.message.clone());
            }
        }
        result
    }

    /// One-shot update. Success invalidates the list and the record's
    /// detail key.
    pub async fn update_crewmate(
        &self,
        id: CrewmateId,
        changes: CrewmateUpdate,
    ) -> ServiceResult<Crewmate> {
        let result = self.service.update_crewmate(id, &changes).await;
        match &result {
            Ok(_) => {
                self.cache
                    .invalidate(&[CacheKey::List, CacheKey::Detail(id)]);
                self.notifier
                    .success("Success!", "Crewmate updated successfully.");
            }
            Err(err) => {
                self.notifier
                    .destructive("Error updating crewmate", err.message.clone());
            }
        }
        result
    }

    /// One-shot delete. Success invalidates the list key.
    pub async fn delete_crewmate(&self, id: CrewmateId) -> ServiceResult<()> {
        let result = self.service.delete_crewmate(id).await;
        match &result {
            Ok(()) => {
                self.cache.invalidate(&[CacheKey::List]);
                self.notifier
                    .success("Success!", "Crewmate deleted successfully.");
            }
            Err(err) => {
                self.notifier
                    .destructive("Error deleting crewmate", err.message.clone());
            }
        }
        result
    }
}
