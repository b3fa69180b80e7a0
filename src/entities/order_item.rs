//! Order item entity - A line snapshot owned by an order.
//!
//! The price field is the unit price copied from the product at order time;
//! later product price changes never touch it. Lines are read-only after
//! creation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the order line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order this line belongs to
    pub order_id: i64,
    /// Product this line refers to
    pub product_id: i64,
    /// Quantity ordered
    pub quantity: i64,
    /// Unit price snapshot taken at order-creation time
    pub price: f64,
}

/// Defines relationships between OrderItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order line belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
    /// Each order line refers to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
