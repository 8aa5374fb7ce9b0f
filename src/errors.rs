//! Unified error types and result handling.
//!
//! One `thiserror` enum covers the whole crate: write-boundary validation
//! failures, store lookups that came up empty, and collaborator errors
//! (database, filesystem, environment) converted via `#[from]`.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or seed-file failure
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A movement quantity that is zero or negative
    #[error("Invalid quantity: {quantity} (must be a positive integer)")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// A product code that does not match the `MMM-SSS` layout
    #[error("Invalid product code: {code} (expected \"NNN-NNN\")")]
    InvalidProductCode {
        /// The rejected code
        code: String,
    },

    /// A report month outside 1..=12
    #[error("Invalid report month: {month} (must be 1-12)")]
    InvalidReportMonth {
        /// The rejected month number
        month: u32,
    },

    /// A unit price below zero
    #[error("Invalid unit price: {price} (must be non-negative)")]
    InvalidUnitPrice {
        /// The rejected price in minor units
        price: i64,
    },

    /// A product lookup that found nothing in the active catalog
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// Name or id of the missing product
        name: String,
    },

    /// A movement lookup that found nothing
    #[error("Movement not found: {id}")]
    MovementNotFound {
        /// Id of the missing movement
        id: i64,
    },

    /// Database error from the store layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
