//! Product entity - Represents store catalog items available for purchase.
//!
//! Each product has a name, price, image reference, and a quantity-on-hand
//! counter. The counter is only ever mutated through atomic updates so it can
//! never go negative, even under concurrent order processing.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Dog Food", "Cat Tree")
    pub name: String,
    /// Unit price in dollars
    pub price: f64,
    /// Human-readable product description
    pub description: String,
    /// Stored image reference (URL or inline data reference)
    pub image: String,
    /// Units currently on hand; never negative
    pub quantity: i64,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product may appear in many cart lines
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
    /// One product may appear in many order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
