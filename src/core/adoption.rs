//! Adoption business logic - Moves pets through the adoption lifecycle.
//!
//! Creating a request hides the pet from further requests; resolving it is
//! terminal. A rejection deletes the request and makes the pet available
//! again, an approval deletes both the request and the pet. Both paths run
//! inside a database transaction, so the request row and the pet outcome
//! move together.

use crate::{
    core::{pet, status::StatusVocabulary},
    entities::{AdoptionRequest, Pet, adoption_request},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Status stored on open requests. Resolution never writes a status; it
/// deletes the row instead.
const PENDING: &str = "Pending";

/// Legal outcome-determining decisions for an adoption request.
///
/// `Pending` is intentionally absent: a request can only move out of
/// Pending, and exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdoptionDecision {
    /// The adoption is finalized and the pet leaves the catalog
    Approved,
    /// The request is declined and the pet becomes available again
    Rejected,
}

impl StatusVocabulary for AdoptionDecision {
    const ENTITY: &'static str = "adoption request";

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Approved" => Some(Self::Approved),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// An adoption request joined with the pet it targets.
#[derive(Debug, Clone)]
pub struct AdoptionRequestDetail {
    /// The request itself
    pub request: adoption_request::Model,
    /// The pet the request is for
    pub pet: crate::entities::pet::Model,
}

/// Creates an adoption request for an available pet.
///
/// As a side effect the pet is marked unavailable immediately, so a pet
/// with any pending request is hidden from new requests before the
/// decision is made. Pet flag and request row are written in one
/// transaction.
///
/// # Errors
/// Returns [`Error::Validation`] for an empty message or a pet that is not
/// currently available, [`Error::NotFound`] for a missing pet.
pub async fn create_request(
    db: &DatabaseConnection,
    pet_id: i64,
    user_id: i64,
    message: String,
) -> Result<adoption_request::Model> {
    if message.trim().is_empty() {
        return Err(Error::Validation {
            message: "adoption request message cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    let target = Pet::find_by_id(pet_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "pet",
            id: pet_id.to_string(),
        })?;
    if !target.available_for_adoption {
        return Err(Error::Validation {
            message: format!("pet {pet_id} is not available for adoption"),
        });
    }

    pet::set_availability(&txn, pet_id, false).await?;

    let request = adoption_request::ActiveModel {
        pet_id: Set(pet_id),
        user_id: Set(user_id),
        message: Set(message.trim().to_string()),
        status: Set(PENDING.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let request = request.insert(&txn).await?;

    txn.commit().await?;

    info!(request_id = request.id, pet_id, user_id, "adoption request created");
    Ok(request)
}

/// Lists all adoption requests joined with pet details, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_requests(db: &DatabaseConnection) -> Result<Vec<AdoptionRequestDetail>> {
    let rows = AdoptionRequest::find()
        .order_by_desc(adoption_request::Column::CreatedAt)
        .find_also_related(Pet)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(request, found)| {
            let found = found.ok_or_else(|| Error::NotFound {
                entity: "pet",
                id: request.pet_id.to_string(),
            })?;
            Ok(AdoptionRequestDetail {
                request,
                pet: found,
            })
        })
        .collect()
}

/// Resolves an adoption request with a terminal decision.
///
/// Rejected: the request is deleted and the pet made available again; the
/// pet is never deleted on rejection. Approved: the request is deleted and
/// the pet removed from the catalog. Returns the removed request with the
/// applied decision in its status field.
///
/// # Errors
/// Returns [`Error::InvalidStatus`] for a decision outside
/// {Approved, Rejected} (nothing is touched), and [`Error::NotFound`] for a
/// missing request — which is also what resolving an already-resolved
/// request looks like, since resolution deletes the row.
pub async fn resolve_request(
    db: &DatabaseConnection,
    request_id: i64,
    raw_decision: &str,
) -> Result<adoption_request::Model> {
    let decision: AdoptionDecision = crate::core::status::parse_status(raw_decision)?;

    let txn = db.begin().await?;

    let request = AdoptionRequest::find_by_id(request_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "adoption request",
            id: request_id.to_string(),
        })?;

    let mut resolved = request.clone();
    let pet_id = request.pet_id;
    request.delete(&txn).await?;

    match decision {
        AdoptionDecision::Rejected => {
            pet::set_availability(&txn, pet_id, true).await?;
        }
        AdoptionDecision::Approved => {
            let adopted = Pet::find_by_id(pet_id)
                .one(&txn)
                .await?
                .ok_or_else(|| Error::NotFound {
                    entity: "pet",
                    id: pet_id.to_string(),
                })?;
            adopted.delete(&txn).await?;
        }
    }

    txn.commit().await?;

    resolved.status = decision.as_str().to_string();
    info!(
        request_id,
        pet_id,
        decision = decision.as_str(),
        "adoption request resolved"
    );
    Ok(resolved)
}
