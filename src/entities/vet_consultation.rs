//! Vet consultation entity - A scheduling request between a user and a vet.
//!
//! Tracked only by status; no side effects on other entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vet consultation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vet_consultations")]
pub struct Model {
    /// Unique identifier for the consultation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Requesting user
    pub user_id: i64,
    /// Target veterinarian, if one was requested
    pub vet_id: Option<i64>,
    /// Requested appointment date and time
    pub requested_date: DateTimeUtc,
    /// Current status: `"Pending"`, `"Approved"`, `"Rejected"`, or `"Completed"`
    pub status: String,
    /// When the consultation was requested
    pub created_at: DateTimeUtc,
    /// When the status last changed
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between VetConsultation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
