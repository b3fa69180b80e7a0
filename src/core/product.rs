//! Product business logic - Catalog CRUD and the quantity-on-hand counter.
//!
//! Besides the admin CRUD operations this module owns the two stock
//! mutations used by the order workflow. Both are single atomic UPDATE
//! statements so concurrent orders touching the same product serialize at
//! the database and the counter can never cross zero.

use crate::{
    entities::{CartItem, OrderItem, Product, cart_item, order_item, product},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::{info, warn};

fn validate_fields(name: &str, price: f64, image: &str, quantity: i64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "product name cannot be empty".to_string(),
        });
    }
    if !price.is_finite() || price < 0.0 {
        return Err(Error::Validation {
            message: format!("product price must be a non-negative number, got {price}"),
        });
    }
    if image.trim().is_empty() {
        return Err(Error::Validation {
            message: "product image reference cannot be empty".to_string(),
        });
    }
    if quantity < 0 {
        return Err(Error::Validation {
            message: format!("product quantity cannot be negative, got {quantity}"),
        });
    }
    Ok(())
}

/// Retrieves all products, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns [`Error::NotFound`] if the product does not exist.
pub async fn get_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "product",
            id: product_id.to_string(),
        })
}

/// Creates a new product with the specified parameters, performing input
/// validation. The image arrives as an already-stored reference; upload
/// mechanics live outside this crate.
///
/// # Errors
/// Returns an error if:
/// - The name or image reference is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The quantity is negative
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    price: f64,
    description: String,
    image: String,
    quantity: i64,
) -> Result<product::Model> {
    validate_fields(&name, price, &image, quantity)?;

    let now = chrono::Utc::now();
    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        price: Set(price),
        description: Set(description),
        image: Set(image),
        quantity: Set(quantity),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let product = product.insert(db).await?;
    info!(product_id = product.id, name = %product.name, "product created");
    Ok(product)
}

/// Updates an existing product's fields, performing input validation.
///
/// # Errors
/// Returns an error if validation fails, the product does not exist, or the
/// database update operation fails.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    name: String,
    price: f64,
    description: String,
    image: String,
    quantity: i64,
) -> Result<product::Model> {
    validate_fields(&name, price, &image, quantity)?;

    let mut product: product::ActiveModel = get_product(db, product_id).await?.into();

    product.name = Set(name.trim().to_string());
    product.price = Set(price);
    product.description = Set(description);
    product.image = Set(image);
    product.quantity = Set(quantity);
    product.updated_at = Set(chrono::Utc::now());

    product.update(db).await.map_err(Into::into)
}

/// Deletes a product that is not referenced by any order or cart line.
///
/// The reference check is explicit so the caller gets a clear
/// "referenced elsewhere" failure instead of a raw foreign-key violation.
///
/// # Errors
/// Returns [`Error::ProductInUse`] when order or cart lines still point at
/// the product, [`Error::NotFound`] when it does not exist.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let product = get_product(db, product_id).await?;

    let order_refs = OrderItem::find()
        .filter(order_item::Column::ProductId.eq(product_id))
        .count(db)
        .await?;
    let cart_refs = CartItem::find()
        .filter(cart_item::Column::ProductId.eq(product_id))
        .count(db)
        .await?;
    if order_refs > 0 || cart_refs > 0 {
        warn!(product_id, order_refs, cart_refs, "refusing to delete referenced product");
        return Err(Error::ProductInUse { id: product_id });
    }

    product.delete(db).await?;
    info!(product_id, "product deleted");
    Ok(())
}

/// Atomically decrements a product's quantity-on-hand with a floor at zero.
///
/// A single `UPDATE products SET quantity = quantity - ? WHERE id = ? AND
/// quantity >= ?` serializes concurrent decrements; when the guard filters
/// the row out the current quantity is re-read for the error report.
///
/// # Errors
/// Returns [`Error::InsufficientStock`] when the decrement would cross
/// zero, [`Error::NotFound`] when the product does not exist.
pub async fn decrement_stock<C>(db: &C, product_id: i64, quantity: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    let updated = Product::update_many()
        .col_expr(
            product::Column::Quantity,
            Expr::col(product::Column::Quantity).sub(quantity),
        )
        .filter(product::Column::Id.eq(product_id))
        .filter(product::Column::Quantity.gte(quantity))
        .exec(db)
        .await?;

    if updated.rows_affected == 0 {
        let product = Product::find_by_id(product_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound {
                entity: "product",
                id: product_id.to_string(),
            })?;
        return Err(Error::InsufficientStock {
            product_id,
            requested: quantity,
            available: product.quantity,
        });
    }

    info!(product_id, quantity, "stock decremented");
    Ok(())
}

/// Atomically hands previously decremented units back to a product.
///
/// # Errors
/// Returns [`Error::NotFound`] when the product does not exist.
pub async fn restore_stock<C>(db: &C, product_id: i64, quantity: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    let updated = Product::update_many()
        .col_expr(
            product::Column::Quantity,
            Expr::col(product::Column::Quantity).add(quantity),
        )
        .filter(product::Column::Id.eq(product_id))
        .exec(db)
        .await?;

    if updated.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "product",
            id: product_id.to_string(),
        });
    }

    info!(product_id, quantity, "stock restored");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_product(
            &db,
            String::new(),
            10.0,
            String::new(),
            "img".to_string(),
            5,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_product(
            &db,
            "Dog Food".to_string(),
            -1.0,
            String::new(),
            "img".to_string(),
            5,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_product(
            &db,
            "Dog Food".to_string(),
            f64::NAN,
            String::new(),
            "img".to_string(),
            5,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_product(
            &db,
            "Dog Food".to_string(),
            10.0,
            String::new(),
            "img".to_string(),
            -2,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_update_product() -> Result<()> {
        let db = setup_test_db().await?;

        let product = create_product(
            &db,
            "  Dog Food ".to_string(),
            12.5,
            "Kibble".to_string(),
            "/img/food.png".to_string(),
            30,
        )
        .await?;
        assert_eq!(product.name, "Dog Food");
        assert_eq!(product.quantity, 30);

        let updated = update_product(
            &db,
            product.id,
            "Premium Dog Food".to_string(),
            15.0,
            "Better kibble".to_string(),
            "/img/food2.png".to_string(),
            25,
        )
        .await?;
        assert_eq!(updated.id, product.id);
        assert_eq!(updated.name, "Premium Dog Food");
        assert_eq!(updated.price, 15.0);
        assert_eq!(updated.quantity, 25);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        delete_product(&db, product.id).await?;
        assert!(matches!(
            get_product(&db, product.id).await.unwrap_err(),
            Error::NotFound { entity: "product", .. }
        ));

        let result = delete_product(&db, product.id).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_in_cart_is_refused() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        crate::core::cart::add_item(&db, 1, product.id, 1).await?;

        let result = delete_product(&db, product.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductInUse { id } if id == product.id
        ));

        // Still present.
        assert!(get_product(&db, product.id).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_stock_floors_at_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Leash", 8.0, 3).await?;

        decrement_stock(&db, product.id, 2).await?;
        assert_eq!(get_product(&db, product.id).await?.quantity, 1);

        let result = decrement_stock(&db, product.id, 2).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientStock {
                requested: 2,
                available: 1,
                ..
            }
        ));

        // The failed decrement left the counter alone.
        assert_eq!(get_product(&db, product.id).await?.quantity, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_restore_stock() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Collar", 6.0, 5).await?;

        decrement_stock(&db, product.id, 4).await?;
        restore_stock(&db, product.id, 4).await?;
        assert_eq!(get_product(&db, product.id).await?.quantity, 5);

        let result = restore_stock(&db, 999, 1).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_products_ordered_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_product(&db, "Treats").await?;
        create_test_product(&db, "Ball").await?;

        let products = list_products(&db).await?;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Ball");
        assert_eq!(products[1].name, "Treats");

        Ok(())
    }
}
