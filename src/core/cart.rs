//! Cart business logic - Handles the per-user staging area for products.
//!
//! Carts are created lazily on the first add for a user. Adding a product
//! that is already in the cart increments the existing line atomically
//! instead of duplicating it, so two concurrent adds for the same
//! (user, product) pair cannot lose an update. Stock is deliberately not
//! checked here; availability is enforced when the order leaves Pending.

use crate::{
    entities::{Cart, CartItem, Product, cart, cart_item, product},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// A cart line joined with its product details.
#[derive(Debug, Clone)]
pub struct CartEntry {
    /// The cart line itself
    pub item: cart_item::Model,
    /// The product the line refers to
    pub product: product::Model,
}

/// Adds a product to a user's cart, creating the cart on first use.
///
/// An existing line for the same product is incremented by `quantity` with a
/// single atomic UPDATE; otherwise a new line is inserted. Returns the
/// resulting line.
///
/// # Errors
/// Returns an error if:
/// - `quantity` is not a positive integer
/// - The product does not exist
/// - The database operation fails
pub async fn add_item(
    db: &DatabaseConnection,
    user_id: i64,
    product_id: i64,
    quantity: i64,
) -> Result<cart_item::Model> {
    use sea_orm::sea_query::Expr;

    if quantity <= 0 {
        return Err(Error::Validation {
            message: format!("quantity must be a positive integer, got {quantity}"),
        });
    }

    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "product",
            id: product_id.to_string(),
        })?;

    let cart = match Cart::find()
        .filter(cart::Column::UserId.eq(user_id))
        .one(db)
        .await?
    {
        Some(cart) => cart,
        None => {
            let cart = cart::ActiveModel {
                user_id: Set(user_id),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            };
            cart.insert(db).await?
        }
    };

    // Atomic increment first; zero rows affected means the line is new.
    let updated = CartItem::update_many()
        .col_expr(
            cart_item::Column::Quantity,
            Expr::col(cart_item::Column::Quantity).add(quantity),
        )
        .filter(cart_item::Column::CartId.eq(cart.id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    if updated.rows_affected == 0 {
        // A concurrent first add for the same pair trips the unique index
        // and surfaces as a store error rather than a duplicate line.
        let line = cart_item::ActiveModel {
            cart_id: Set(cart.id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            ..Default::default()
        };
        let line = line.insert(db).await?;
        info!(user_id, product_id, quantity, "cart line created");
        return Ok(line);
    }

    CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "cart item",
            id: format!("cart {} product {product_id}", cart.id),
        })
}

/// Lists a user's cart lines joined with product details.
///
/// A user without a cart gets an empty list, not an error.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_items(db: &DatabaseConnection, user_id: i64) -> Result<Vec<CartEntry>> {
    let Some(cart) = Cart::find()
        .filter(cart::Column::UserId.eq(user_id))
        .one(db)
        .await?
    else {
        return Ok(Vec::new());
    };

    let rows = CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .find_also_related(Product)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(item, product)| {
            let product = product.ok_or_else(|| Error::NotFound {
                entity: "product",
                id: item.product_id.to_string(),
            })?;
            Ok(CartEntry { item, product })
        })
        .collect()
}

/// Removes a single line from a user's cart.
///
/// # Errors
/// Returns [`Error::NotFound`] when the user has no cart or the line does
/// not belong to that cart. Other lines are left untouched.
pub async fn remove_item(
    db: &DatabaseConnection,
    user_id: i64,
    cart_item_id: i64,
) -> Result<()> {
    let cart = Cart::find()
        .filter(cart::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "cart",
            id: format!("user {user_id}"),
        })?;

    let item = CartItem::find_by_id(cart_item_id)
        .filter(cart_item::Column::CartId.eq(cart.id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "cart item",
            id: cart_item_id.to_string(),
        })?;

    item.delete(db).await?;
    info!(user_id, cart_item_id, "cart line removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_item_rejects_non_positive_quantity() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let result = add_item(&db, 1, product.id, 0).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = add_item(&db, 1, product.id, -3).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_unknown_product() -> Result<()> {
        let db = setup_test_db().await?;

        let result = add_item(&db, 1, 999, 1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound { entity: "product", .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_repeated_adds_accumulate_into_one_line() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let first = add_item(&db, 7, product.id, 2).await?;
        assert_eq!(first.quantity, 2);

        let second = add_item(&db, 7, product.id, 3).await?;
        assert_eq!(second.id, first.id);
        assert_eq!(second.quantity, 5);

        let entries = list_items(&db, 7).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item.quantity, 5);
        assert_eq!(entries[0].product.id, product.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_adds_for_different_users_get_separate_carts() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        add_item(&db, 1, product.id, 1).await?;
        add_item(&db, 2, product.id, 4).await?;

        assert_eq!(list_items(&db, 1).await?[0].item.quantity, 1);
        assert_eq!(list_items(&db, 2).await?[0].item.quantity, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_items_without_cart_is_empty() -> Result<()> {
        let db = setup_test_db().await?;

        let entries = list_items(&db, 42).await?;
        assert!(entries.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_item() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let other = create_test_product(&db, "Cat Tree").await?;

        let line = add_item(&db, 5, product.id, 2).await?;
        add_item(&db, 5, other.id, 1).await?;

        remove_item(&db, 5, line.id).await?;

        let entries = list_items(&db, 5).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].product.id, other.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_item_requires_matching_cart() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let line = add_item(&db, 5, product.id, 2).await?;

        // No cart at all for this user.
        let result = remove_item(&db, 6, line.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound { entity: "cart", .. }
        ));

        // A cart exists, but the line belongs to someone else.
        add_item(&db, 6, product.id, 1).await?;
        let result = remove_item(&db, 6, line.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound { entity: "cart item", .. }
        ));

        // The original line is untouched.
        assert_eq!(list_items(&db, 5).await?.len(), 1);

        Ok(())
    }
}
