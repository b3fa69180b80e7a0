//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. The
//! schema is generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database always matches the
//! Rust struct definitions without manual SQL. The connection is built once
//! at startup from the resolved [`crate::config::server::AppConfig`] and
//! handed down to every layer that needs it.

use crate::entities::{
    AdoptionRequest, Cart, CartItem, Order, OrderItem, Pet, Product, VetConsultation,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database behind the given URL.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions, plus the uniqueness
/// index the cart upsert relies on. Idempotent, so it runs on every boot.
///
/// # Errors
/// Returns an error if any schema statement fails to execute.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    use sea_orm::sea_query::{Alias, Index};

    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Parents before children so the foreign keys have targets.
    let mut statements = vec![
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(Pet),
        schema.create_table_from_entity(Cart),
        schema.create_table_from_entity(CartItem),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderItem),
        schema.create_table_from_entity(AdoptionRequest),
        schema.create_table_from_entity(VetConsultation),
    ];
    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    // One line per (cart, product) pair is a database constraint, not just
    // application logic; a racing duplicate insert fails here.
    let cart_line_index = Index::create()
        .name("idx_cart_items_cart_product")
        .table(Alias::new("cart_items"))
        .col(Alias::new("cart_id"))
        .col(Alias::new("product_id"))
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&cart_line_index)).await?;

    Ok(())
}
