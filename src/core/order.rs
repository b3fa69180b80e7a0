//! Order business logic - Converts carts into immutable orders and drives
//! the order status machine.
//!
//! Placement snapshots the client's cart view (product id, unit price,
//! quantity) into order lines, computes the total once, and clears the
//! user's cart — all inside one database transaction, so a crash can never
//! leave an order without its lines or a half-cleared cart. Status changes
//! run through the shared vocabulary guard and carry the inventory side
//! effects described on [`set_order_status`].

use crate::{
    core::{product, status::StatusVocabulary},
    entities::{Cart, CartItem, Order, OrderItem, cart, cart_item, order, order_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Legal order statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Placed, inventory not yet applied
    Pending,
    /// Accepted for fulfilment; inventory has been decremented
    Processing,
    /// Handed to the carrier
    Shipped,
    /// Received by the customer
    Delivered,
    /// Cancelled after leaving Pending (record retained)
    Cancelled,
}

impl StatusVocabulary for OrderStatus {
    const ENTITY: &'static str = "order";

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Pending" => Some(Self::Pending),
            "Processing" => Some(Self::Processing),
            "Shipped" => Some(Self::Shipped),
            "Delivered" => Some(Self::Delivered),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// One line of an order as supplied by the caller: the client's snapshot of
/// its cart at submission time.
#[derive(Debug, Clone)]
pub struct OrderLineInput {
    /// Product the line refers to
    pub product_id: i64,
    /// Unit price as seen by the client
    pub price: f64,
    /// Quantity ordered
    pub quantity: i64,
}

/// An order together with its owned line snapshots.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    /// The order record
    pub order: order::Model,
    /// Its line snapshots
    pub items: Vec<order_item::Model>,
}

/// Places an order from the given line snapshots and clears the user's cart.
///
/// The total is computed from the supplied prices; the cart-to-order path
/// trusts the client's snapshot by contract. Re-fetching authoritative
/// prices from the product table before the insert would be the hardening
/// hook if that contract ever changes.
///
/// The order and its lines are created before the cart is touched, and the
/// whole sequence commits atomically. A user without a cart can still place
/// a direct order; the clearing step just finds nothing to delete.
///
/// # Errors
/// Returns [`Error::Validation`] for an empty line list, a non-positive
/// line quantity, or a negative/non-finite line price. No order is created
/// in any of those cases.
pub async fn place_order(
    db: &DatabaseConnection,
    user_id: i64,
    lines: Vec<OrderLineInput>,
) -> Result<OrderWithItems> {
    if lines.is_empty() {
        return Err(Error::Validation {
            message: "order must contain at least one line".to_string(),
        });
    }
    for line in &lines {
        if line.quantity <= 0 {
            return Err(Error::Validation {
                message: format!(
                    "line quantity must be a positive integer, got {} for product {}",
                    line.quantity, line.product_id
                ),
            });
        }
        if !line.price.is_finite() || line.price < 0.0 {
            return Err(Error::Validation {
                message: format!(
                    "line price must be a non-negative number, got {} for product {}",
                    line.price, line.product_id
                ),
            });
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let total_amount: f64 = lines.iter().map(|l| l.price * l.quantity as f64).sum();

    let txn = db.begin().await?;

    let now = chrono::Utc::now();
    let order = order::ActiveModel {
        user_id: Set(user_id),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        total_amount: Set(total_amount),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let order = order.insert(&txn).await?;

    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let item = order_item::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            price: Set(line.price),
            ..Default::default()
        };
        items.push(item.insert(&txn).await?);
    }

    if let Some(user_cart) = Cart::find()
        .filter(cart::Column::UserId.eq(user_id))
        .one(&txn)
        .await?
    {
        CartItem::delete_many()
            .filter(cart_item::Column::CartId.eq(user_cart.id))
            .exec(&txn)
            .await?;
        user_cart.delete(&txn).await?;
    }

    txn.commit().await?;

    info!(
        order_id = order.id,
        user_id,
        total_amount,
        line_count = items.len(),
        "order placed"
    );
    Ok(OrderWithItems { order, items })
}

/// Lists orders, optionally restricted to one user, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_orders(
    db: &DatabaseConnection,
    user_id: Option<i64>,
) -> Result<Vec<OrderWithItems>> {
    let mut query = Order::find().order_by_desc(order::Column::CreatedAt);
    if let Some(user_id) = user_id {
        query = query.filter(order::Column::UserId.eq(user_id));
    }

    let rows = query.find_with_related(OrderItem).all(db).await?;
    Ok(rows
        .into_iter()
        .map(|(order, items)| OrderWithItems { order, items })
        .collect())
}

/// Retrieves a single order with its line snapshots.
///
/// # Errors
/// Returns [`Error::NotFound`] if the order does not exist.
pub async fn get_order(db: &DatabaseConnection, order_id: i64) -> Result<OrderWithItems> {
    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;
    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .all(db)
        .await?;
    Ok(OrderWithItems { order, items })
}

/// Mutates an order's status, applying the inventory side-effect table.
///
/// The first transition out of Pending to a status other than Cancelled
/// decrements every line's product stock exactly once; later transitions
/// never re-decrement. Cancelling a Processing order hands the decremented
/// units back; cancelling a Shipped or Delivered order does not (the goods
/// already left the warehouse).
///
/// Everything runs inside one transaction: an [`Error::InsufficientStock`]
/// on any line aborts the whole transition and the order keeps its current
/// status.
///
/// # Errors
/// Returns [`Error::InvalidStatus`] for a value outside the order
/// vocabulary, [`Error::NotFound`] for a missing order, and
/// [`Error::InsufficientStock`] when a decrement would cross zero.
pub async fn set_order_status(
    db: &DatabaseConnection,
    order_id: i64,
    raw_status: &str,
) -> Result<order::Model> {
    let new_status: OrderStatus = crate::core::status::parse_status(raw_status)?;

    let txn = db.begin().await?;

    let existing = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;
    let current: OrderStatus = crate::core::status::parse_status(&existing.status)?;

    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .all(&txn)
        .await?;

    if current == OrderStatus::Pending
        && !matches!(new_status, OrderStatus::Pending | OrderStatus::Cancelled)
    {
        for item in &items {
            product::decrement_stock(&txn, item.product_id, item.quantity).await?;
        }
    }
    if current == OrderStatus::Processing && new_status == OrderStatus::Cancelled {
        for item in &items {
            product::restore_stock(&txn, item.product_id, item.quantity).await?;
        }
    }

    let mut active: order::ActiveModel = existing.into();
    active.status = Set(new_status.as_str().to_string());
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    info!(
        order_id,
        from = current.as_str(),
        to = new_status.as_str(),
        "order status updated"
    );
    Ok(updated)
}

/// Cancels an order that is still Pending, deleting it and its lines.
///
/// This is a different path from setting the status to Cancelled: a pending
/// cancellation leaves no record behind, while a post-processing
/// cancellation retains the order with a Cancelled status.
///
/// # Errors
/// Returns [`Error::NotFound`] for a missing order and [`Error::Validation`]
/// when the order has already left Pending.
pub async fn cancel_order(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let existing = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;

    if existing.status != OrderStatus::Pending.as_str() {
        return Err(Error::Validation {
            message: format!(
                "order {order_id} cannot be cancelled in status {:?}",
                existing.status
            ),
        });
    }

    OrderItem::delete_many()
        .filter(order_item::Column::OrderId.eq(order_id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;

    txn.commit().await?;

    info!(order_id, "pending order cancelled and deleted");
    Ok(())
}
