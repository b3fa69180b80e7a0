//! Unified error types and result handling.
//!
//! Every layer below the HTTP boundary returns this crate's [`Error`].
//! The API layer owns the mapping from these variants onto status codes.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was missing or malformed.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of what failed validation
        message: String,
    },

    /// A referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. "product" or "adoption request"
        entity: &'static str,
        /// Identifier that failed to resolve
        id: String,
    },

    /// A status value outside the entity's legal vocabulary.
    #[error("invalid {entity} status: {value:?}")]
    InvalidStatus {
        /// Entity kind the status was aimed at
        entity: &'static str,
        /// The rejected raw value
        value: String,
    },

    /// A stock decrement would have taken a product's quantity below zero.
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        /// Product whose quantity guard rejected the decrement
        product_id: i64,
        /// Quantity the order line asked for
        requested: i64,
        /// Quantity on hand at the time of the failed decrement
        available: i64,
    },

    /// A product delete was refused because order or cart lines reference it.
    #[error("product {id} is referenced by existing orders or carts")]
    ProductInUse {
        /// The product that could not be deleted
        id: i64,
    },

    /// Configuration file or startup problem.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Database error from the storage layer.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
