//! Pet entity - Represents an adoptable pet in the catalog.
//!
//! A pet stays visible for adoption while `available_for_adoption` is true.
//! Creating an adoption request flips the flag off; rejecting the request
//! flips it back on, and approving the request removes the pet entirely.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pet database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    /// Unique identifier for the pet
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the pet
    pub name: String,
    /// Breed description (e.g., "Golden Retriever")
    pub breed: String,
    /// Age in years
    pub age: i32,
    /// Free-form description shown in listings
    pub description: String,
    /// Stored image reference (URL or inline data reference)
    pub image: String,
    /// User who listed the pet, if any
    pub owner_user_id: Option<i64>,
    /// Whether the pet can currently be requested for adoption
    pub available_for_adoption: bool,
    /// When the pet was created
    pub created_at: DateTimeUtc,
    /// When the pet was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Pet and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One pet may have adoption requests pointing at it
    #[sea_orm(has_many = "super::adoption_request::Entity")]
    AdoptionRequests,
}

impl Related<super::adoption_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdoptionRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
