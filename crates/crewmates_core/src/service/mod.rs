//! Record service layer and error normalization.
//!
//! # Responsibility
//! - Convert every store failure into one fixed, user-presentable shape.
//! - Define the uniform result type all callers branch on.
//!
//! # Invariants
//! - Nothing above this layer ever sees a raw store error.
//! - Normalization itself never panics, whatever the source error is.

use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod crewmate_service;

pub use crewmate_service::CrewmateService;

/// Fixed user-facing text for any store failure.
pub const DB_ERROR_MESSAGE: &str = "An error occurred while accessing the database";
const UNKNOWN_DETAILS: &str = "Unknown error";

/// Uniform result returned by every record-service operation.
///
/// The success arm carries the operation's data (`()` for delete); the
/// failure arm always carries a [`NormalizedError`]. Callers branch on the
/// variant instead of handling raised errors.
pub type ServiceResult<T> = Result<T, NormalizedError>;

/// The fixed shape all service failures are converted into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    /// Always [`DB_ERROR_MESSAGE`]; suitable for direct display.
    pub message: String,
    /// The source error's own message, for diagnostics surfaces.
    pub details: String,
}

impl Display for NormalizedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.message, self.details)
    }
}

impl Error for NormalizedError {}

/// Maps any error into the fixed `{message, details}` shape.
///
/// # Side effects
/// - Logs the original error for diagnostics.
///
/// # Contract
/// - `details` falls back to a default text when the source renders empty.
/// - Never panics.
pub fn normalize_error(source: &(dyn Error + 'static)) -> NormalizedError {
    error!("event=store_error module=service status=error error={source}");

    let details = source.to_string();
    let details = if details.trim().is_empty() {
        UNKNOWN_DETAILS.to_string()
    } else {
        details
    };

    NormalizedError {
        message: DB_ERROR_MESSAGE.to_string(),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_error, DB_ERROR_MESSAGE};
    use std::error::Error;
    use std::fmt::{Display, Formatter};

    #[derive(Debug)]
    struct Silent;

    impl Display for Silent {
        fn fmt(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
            Ok(())
        }
    }

    impl Error for Silent {}

    #[test]
    fn normalization_keeps_fixed_message_and_source_details() {
        let source = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let normalized = normalize_error(&source);
        assert_eq!(normalized.message, DB_ERROR_MESSAGE);
        assert_eq!(normalized.details, "connection reset");
    }

    #[test]
    fn empty_source_message_falls_back_to_unknown() {
        let normalized = normalize_error(&Silent);
        assert_eq!(normalized.details, "Unknown error");
    }
}
