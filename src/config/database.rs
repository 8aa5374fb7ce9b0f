//! Database configuration module for `StockLedger`.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. Table creation derives the SQL from the entity definitions via
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without manual SQL.

use crate::entities::{Product, Settings, Transaction};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/stock_ledger.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the `SQLite` database.
///
/// Uses [`get_database_url`] so the target can be overridden through the
/// environment.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all tables from the entity definitions if they do not exist yet.
///
/// Safe to run against an already-initialized database file.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(Product);
    let mut transaction_table = schema.create_table_from_entity(Transaction);
    let mut settings_table = schema.create_table_from_entity(Settings);

    db.execute(builder.build(product_table.if_not_exists()))
        .await?;
    db.execute(builder.build(transaction_table.if_not_exists()))
        .await?;
    db.execute(builder.build(settings_table.if_not_exists()))
        .await?;

    Ok(())
}
