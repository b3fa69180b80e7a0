//! Adoption request entity - A user's pending claim on a pet.
//!
//! Persisted rows are always `"Pending"`: resolving a request deletes the
//! row and applies the outcome to the pet, so moving out of Pending is
//! terminal by construction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Adoption request database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "adoption_requests")]
pub struct Model {
    /// Unique identifier for the request
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Pet the request is for
    pub pet_id: i64,
    /// Requesting user
    pub user_id: i64,
    /// Message the requester attached
    pub message: String,
    /// Current status; stored rows hold `"Pending"`
    pub status: String,
    /// When the request was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between AdoptionRequest and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each request references one pet; deleting the pet removes its requests
    #[sea_orm(
        belongs_to = "super::pet::Entity",
        from = "Column::PetId",
        to = "super::pet::Column::Id",
        on_delete = "Cascade"
    )]
    Pet,
}

impl Related<super::pet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
