//! Shared test utilities for `StockLedger`.
//!
//! This module provides common helper functions for setting up test
//! databases, creating store-backed test entities, and building in-memory
//! fixtures for the pure pipeline stages.

use crate::{
    core::{
        product,
        transaction::{self, Movement},
    },
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Parses a `YYYY-MM-DD` literal. Test fixtures only.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Creates a test product with no sort code.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, name.to_string(), None).await
}

/// Creates a test product with a sort code.
pub async fn create_coded_product(
    db: &DatabaseConnection,
    name: &str,
    code: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, name.to_string(), Some(code.to_string())).await
}

/// Records a test movement on the given business date.
///
/// # Defaults
/// * `worker_id`: `"test_worker"`
pub async fn create_test_movement(
    db: &DatabaseConnection,
    product_id: i64,
    date_str: &str,
    movement: Movement,
    quantity: i64,
) -> Result<entities::transaction::Model> {
    transaction::record_movement(
        db,
        date(date_str),
        product_id,
        movement,
        quantity,
        Some("test_worker".to_string()),
    )
    .await
}

/// Builds an in-memory product model for pure pipeline tests; no store
/// involved.
pub fn make_product(id: i64, name: &str) -> entities::product::Model {
    entities::product::Model {
        id,
        name: name.to_string(),
        code: None,
        is_deleted: false,
        created_at: chrono::NaiveDateTime::default(),
        updated_at: chrono::NaiveDateTime::default(),
    }
}

/// Builds an in-memory movement model for pure pipeline tests; no store
/// involved.
pub fn make_movement(
    id: i64,
    date_str: &str,
    product_id: i64,
    movement: Movement,
    quantity: i64,
) -> entities::transaction::Model {
    entities::transaction::Model {
        id,
        date: date(date_str),
        product_id,
        product_name: "Test Product".to_string(),
        movement_type: movement.as_str().to_string(),
        quantity,
        timestamp: chrono::DateTime::default(),
        worker_id: None,
    }
}
