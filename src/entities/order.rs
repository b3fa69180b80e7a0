//! Order entity - Immutable record of a completed purchase intent.
//!
//! The total amount is computed once at creation from the line snapshots and
//! never recomputed; only `status` changes after insert. Status values are
//! drawn from [`crate::core::order::OrderStatus`] and validated before any
//! write reaches this table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who placed the order
    pub user_id: i64,
    /// Current status: `"Pending"`, `"Processing"`, `"Shipped"`,
    /// `"Delivered"`, or `"Cancelled"`
    pub status: String,
    /// Total amount at order time: sum of line price x quantity
    pub total_amount: f64,
    /// When the order was placed
    pub created_at: DateTimeUtc,
    /// When the order status last changed
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order owns many order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
