//! Cart entity - Per-user staging area for products pending an order.
//!
//! Carts are created lazily on the first add-to-cart for a user and deleted
//! once their lines convert into an order. At most one cart exists per user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    /// Unique identifier for the cart
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user; unique, so a user has at most one cart
    #[sea_orm(unique)]
    pub user_id: i64,
    /// When the cart was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Cart and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One cart owns many cart lines
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
