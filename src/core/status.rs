//! Shared guarded-status-mutation logic.
//!
//! Orders, adoption requests, and vet consultations each carry a `status`
//! column with a fixed vocabulary of legal values and entity-specific side
//! effects on certain transitions. The vocabulary guard lives here once; the
//! side-effect tables stay with their owning modules.

use crate::errors::{Error, Result};

/// A fixed set of legal status values for one entity.
///
/// Implementors map between the wire/database string form and the typed
/// value. Parsing is strict: casing and spelling must match exactly.
pub trait StatusVocabulary: Sized + Copy {
    /// Entity label used in error messages (e.g. "order").
    const ENTITY: &'static str;

    /// Parses a raw string into a legal status value.
    fn parse(raw: &str) -> Option<Self>;

    /// The canonical string form stored in the database.
    fn as_str(self) -> &'static str;
}

/// Validates a caller-supplied status value against an entity's vocabulary.
///
/// # Errors
/// Returns [`Error::InvalidStatus`] when the value is not in the vocabulary.
/// No store access happens on the rejection path, so an invalid value can
/// never leave partial side effects behind.
pub fn parse_status<S: StatusVocabulary>(raw: &str) -> Result<S> {
    S::parse(raw).ok_or_else(|| Error::InvalidStatus {
        entity: S::ENTITY,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::adoption::AdoptionDecision;
    use crate::core::consultation::ConsultationStatus;
    use crate::core::order::OrderStatus;

    #[test]
    fn test_order_vocabulary_round_trip() {
        for raw in ["Pending", "Processing", "Shipped", "Delivered", "Cancelled"] {
            let status: OrderStatus = parse_status(raw).unwrap();
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = parse_status::<OrderStatus>("Maybe");
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidStatus { entity: "order", .. }
        ));

        // Parsing is case-sensitive, matching the stored string form.
        assert!(parse_status::<OrderStatus>("pending").is_err());
        assert!(parse_status::<ConsultationStatus>("").is_err());
    }

    #[test]
    fn test_adoption_decision_excludes_pending() {
        // Pending is a stored state, never a legal resolution target.
        assert!(parse_status::<AdoptionDecision>("Pending").is_err());
        assert!(parse_status::<AdoptionDecision>("Approved").is_ok());
        assert!(parse_status::<AdoptionDecision>("Rejected").is_ok());
    }

    #[test]
    fn test_consultation_vocabulary_includes_completed() {
        let status: ConsultationStatus = parse_status("Completed").unwrap();
        assert_eq!(status.as_str(), "Completed");
    }
}
