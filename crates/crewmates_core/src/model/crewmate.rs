//! Crewmate domain model.
//!
//! # Responsibility
//! - Define the persisted row shape and the insert/update payload shapes.
//! - Provide validation helpers for the field invariants.
//!
//! # Invariants
//! - `id` is store-assigned, unique, and immutable for the record lifetime.
//! - `name` and `color` are non-empty; `speed` is non-negative.
//! - Deletion is a hard delete; there is no tombstone state to model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable store-assigned identifier for a crewmate row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CrewmateId = i64;

/// Display palette offered by the creation form.
///
/// Advisory only: the store accepts any non-empty color text.
pub const COLOR_PALETTE: [&str; 8] = [
    "Red", "Green", "Blue", "Purple", "Yellow", "Orange", "Pink", "Rainbow",
];

/// A persisted crewmate row as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crewmate {
    /// Store-assigned primary key.
    pub id: CrewmateId,
    pub name: String,
    /// Speed in mph. Non-negative.
    pub speed: f64,
    pub color: String,
    /// Assigned by the store at insert time when the payload omits it.
    /// Sole sort key (descending) for listings.
    pub created_at: DateTime<Utc>,
}

/// Insert payload: a full record minus the store-assigned `id`.
///
/// `created_at` may be supplied by callers (import paths); when `None` it is
/// omitted from the serialized payload so the store assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCrewmate {
    pub name: String,
    pub speed: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial update payload.
///
/// `None` fields are omitted from the serialized payload, leaving the stored
/// column untouched. `id` and `created_at` are deliberately not updatable
/// through this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrewmateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Field-invariant violations detected before a store round-trip.
#[derive(Debug, Clone, PartialEq)]
pub enum CrewmateValidationError {
    EmptyName,
    EmptyColor,
    NegativeSpeed { speed: f64 },
    EmptyUpdate,
}

impl Display for CrewmateValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyColor => write!(f, "color must not be empty"),
            Self::NegativeSpeed { speed } => {
                write!(f, "speed must be non-negative, got {speed}")
            }
            Self::EmptyUpdate => write!(f, "update payload contains no fields"),
        }
    }
}

impl Error for CrewmateValidationError {}

impl NewCrewmate {
    /// Creates an insert payload with a store-assigned creation timestamp.
    pub fn new(name: impl Into<String>, speed: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            speed,
            color: color.into(),
            created_at: None,
        }
    }

    /// Checks the field invariants of this payload.
    ///
    /// # Errors
    /// - `EmptyName` / `EmptyColor` when the trimmed text is empty.
    /// - `NegativeSpeed` when `speed < 0` (NaN is also rejected).
    pub fn validate(&self) -> Result<(), CrewmateValidationError> {
        if self.name.trim().is_empty() {
            return Err(CrewmateValidationError::EmptyName);
        }
        if !(self.speed >= 0.0) {
            return Err(CrewmateValidationError::NegativeSpeed { speed: self.speed });
        }
        if self.color.trim().is_empty() {
            return Err(CrewmateValidationError::EmptyColor);
        }
        Ok(())
    }
}

impl CrewmateUpdate {
    /// Returns whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.speed.is_none() && self.color.is_none()
    }

    /// Checks the field invariants of the fields that are present.
    ///
    /// # Errors
    /// - `EmptyUpdate` when no field is set (nothing to persist).
    /// - Same per-field errors as [`NewCrewmate::validate`] otherwise.
    pub fn validate(&self) -> Result<(), CrewmateValidationError> {
        if self.is_empty() {
            return Err(CrewmateValidationError::EmptyUpdate);
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(CrewmateValidationError::EmptyName);
            }
        }
        if let Some(speed) = self.speed {
            if !(speed >= 0.0) {
                return Err(CrewmateValidationError::NegativeSpeed { speed });
            }
        }
        if let Some(color) = &self.color {
            if color.trim().is_empty() {
                return Err(CrewmateValidationError::EmptyColor);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CrewmateUpdate, CrewmateValidationError, NewCrewmate};

    #[test]
    fn valid_insert_payload_passes() {
        let payload = NewCrewmate::new("Ted", 2.5, "Blue");
        assert!(payload.validate().is_ok());
        assert!(payload.created_at.is_none());
    }

    #[test]
    fn blank_name_and_color_are_rejected() {
        let mut payload = NewCrewmate::new("  ", 1.0, "Blue");
        assert_eq!(
            payload.validate().unwrap_err(),
            CrewmateValidationError::EmptyName
        );

        payload.name = "Ted".to_string();
        payload.color = String::new();
        assert_eq!(
            payload.validate().unwrap_err(),
            CrewmateValidationError::EmptyColor
        );
    }

    #[test]
    fn negative_and_nan_speed_are_rejected() {
        let payload = NewCrewmate::new("Ted", -0.5, "Blue");
        assert!(matches!(
            payload.validate().unwrap_err(),
            CrewmateValidationError::NegativeSpeed { .. }
        ));

        let payload = NewCrewmate::new("Ted", f64::NAN, "Blue");
        assert!(matches!(
            payload.validate().unwrap_err(),
            CrewmateValidationError::NegativeSpeed { .. }
        ));
    }

    #[test]
    fn empty_update_is_rejected_and_partial_update_passes() {
        assert_eq!(
            CrewmateUpdate::default().validate().unwrap_err(),
            CrewmateValidationError::EmptyUpdate
        );

        let update = CrewmateUpdate {
            speed: Some(4.0),
            ..CrewmateUpdate::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn palette_entries_are_unique_and_valid_colors() {
        let unique: std::collections::HashSet<_> = super::COLOR_PALETTE.iter().collect();
        assert_eq!(unique.len(), super::COLOR_PALETTE.len());
        for color in super::COLOR_PALETTE {
            assert!(NewCrewmate::new("Ted", 1.0, color).validate().is_ok());
        }
    }

    #[test]
    fn insert_payload_omits_unset_created_at_in_json() {
        let payload = NewCrewmate::new("Ted", 2.5, "Blue");
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("created_at").is_none());

        let update = CrewmateUpdate {
            color: Some("Pink".to_string()),
            ..CrewmateUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
    }
}
