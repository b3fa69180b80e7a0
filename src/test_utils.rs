//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{core::pet, core::product, entities, errors::Result};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * `price`: 10.0
/// * `quantity`: 50
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        name.to_string(),
        10.0,
        "Test product".to_string(),
        "/img/test.png".to_string(),
        50,
    )
    .await
}

/// Creates a test product with custom price and quantity.
/// Use this when a test cares about totals or stock levels.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    quantity: i64,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        name.to_string(),
        price,
        String::new(),
        "/img/test.png".to_string(),
        quantity,
    )
    .await
}

/// Creates a test pet with sensible defaults.
///
/// # Defaults
/// * `breed`: "Beagle"
/// * `age`: 2
/// * no owner
pub async fn create_test_pet(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::pet::Model> {
    pet::create_pet(
        db,
        name.to_string(),
        "Beagle".to_string(),
        2,
        "Friendly".to_string(),
        "/img/pet.png".to_string(),
        None,
    )
    .await
}

/// Sets up a complete test environment with one product in stock.
/// Returns (db, product) for common cart and order scenarios.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Dog Food").await?;
    Ok((db, product))
}
