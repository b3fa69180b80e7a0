//! Vet consultation business logic - Scheduling requests tracked by status.
//!
//! Consultations have no side effects on other entities; their status just
//! moves through the vocabulary below.

use crate::{
    core::status::StatusVocabulary,
    entities::{VetConsultation, vet_consultation},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Legal vet consultation statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultationStatus {
    /// Waiting for a vet to respond
    Pending,
    /// Accepted by the vet
    Approved,
    /// Declined by the vet
    Rejected,
    /// The appointment took place
    Completed,
}

impl StatusVocabulary for ConsultationStatus {
    const ENTITY: &'static str = "vet consultation";

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Pending" => Some(Self::Pending),
            "Approved" => Some(Self::Approved),
            "Rejected" => Some(Self::Rejected),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Completed => "Completed",
        }
    }
}

/// Creates a consultation request with status Pending.
///
/// # Errors
/// Returns an error if the database insert operation fails.
pub async fn create_consultation(
    db: &DatabaseConnection,
    user_id: i64,
    vet_id: Option<i64>,
    requested_date: DateTime<Utc>,
) -> Result<vet_consultation::Model> {
    let now = Utc::now();
    let consultation = vet_consultation::ActiveModel {
        user_id: Set(user_id),
        vet_id: Set(vet_id),
        requested_date: Set(requested_date),
        status: Set(ConsultationStatus::Pending.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let consultation = consultation.insert(db).await?;
    info!(
        consultation_id = consultation.id,
        user_id, "vet consultation requested"
    );
    Ok(consultation)
}

/// Lists all consultation requests, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_consultations(
    db: &DatabaseConnection,
) -> Result<Vec<vet_consultation::Model>> {
    VetConsultation::find()
        .order_by_desc(vet_consultation::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Mutates a consultation's status. No side effects beyond the stored value.
///
/// # Errors
/// Returns [`Error::InvalidStatus`] for a value outside the vocabulary and
/// [`Error::NotFound`] for a missing consultation.
pub async fn set_consultation_status(
    db: &DatabaseConnection,
    consultation_id: i64,
    raw_status: &str,
) -> Result<vet_consultation::Model> {
    let new_status: ConsultationStatus = crate::core::status::parse_status(raw_status)?;

    let mut existing: vet_consultation::ActiveModel =
        VetConsultation::find_by_id(consultation_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound {
                entity: "vet consultation",
                id: consultation_id.to_string(),
            })?
            .into();

    existing.status = Set(new_status.as_str().to_string());
    existing.updated_at = Set(Utc::now());
    let updated = existing.update(db).await?;

    info!(consultation_id, status = new_status.as_str(), "vet consultation updated");
    Ok(updated)
}
