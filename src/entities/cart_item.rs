//! Cart item entity - A (cart, product) line with an accumulating quantity.
//!
//! Repeated add-to-cart calls for the same product increment the existing
//! line's quantity instead of creating duplicates.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    /// Unique identifier for the cart line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Cart this line belongs to
    pub cart_id: i64,
    /// Product this line refers to
    pub product_id: i64,
    /// Accumulated quantity; always positive
    pub quantity: i64,
}

/// Defines relationships between CartItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each cart line belongs to one cart
    #[sea_orm(
        belongs_to = "super::cart::Entity",
        from = "Column::CartId",
        to = "super::cart::Column::Id",
        on_delete = "Cascade"
    )]
    Cart,
    /// Each cart line refers to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::cart::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cart.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
