//! In-process crewmate store for tests and local development.
//!
//! # Responsibility
//! - Mirror the hosted table's observable behavior without a network.
//! - Allow failure injection so error paths can be exercised.
//!
//! # Invariants
//! - Assigned ids are unique and strictly increasing per store instance.
//! - `created_at` defaults to now and is never rewritten by updates.
//! - `delete` succeeds whether or not the row exists, like the backend.

use super::{StoreError, StoreResult};
use crate::model::crewmate::{Crewmate, CrewmateId, CrewmateUpdate, NewCrewmate};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

/// In-memory stand-in for the hosted crewmates table.
#[derive(Debug)]
pub struct MemoryStore {
    rows: Mutex<Vec<Crewmate>>,
    next_id: AtomicI64,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            failing: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent operation fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 503,
                message: "simulated store outage".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl super::CrewmateStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Crewmate>> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone();
        // Newest first; id breaks ties between same-instant inserts.
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn get(&self, id: CrewmateId) -> StoreResult<Crewmate> {
        self.check_available()?;
        self.rows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or(StoreError::RowNotFound)
    }

    async fn insert(&self, row: &NewCrewmate) -> StoreResult<Crewmate> {
        self.check_available()?;
        let stored = Crewmate {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: row.name.clone(),
            speed: row.speed,
            color: row.color.clone(),
            created_at: row.created_at.unwrap_or_else(Utc::now),
        };
        self.rows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: CrewmateId, changes: &CrewmateUpdate) -> StoreResult<Crewmate> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::RowNotFound)?;

        if let Some(name) = &changes.name {
            row.name = name.clone();
        }
        if let Some(speed) = changes.speed {
            row.speed = speed;
        }
        if let Some(color) = &changes.color {
            row.color = color.clone();
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: CrewmateId) -> StoreResult<()> {
        self.check_available()?;
        self.rows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .retain(|row| row.id != id);
        Ok(())
    }
}
