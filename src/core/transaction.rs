//! Stock movement business logic - Handles all movement-related operations.
//!
//! This module is the write boundary for the movement history: it validates
//! new movements (positive quantity, product present in the active catalog),
//! denormalizes the product name onto the event, and stamps the creation
//! instant. Movements are immutable once recorded; the only other operation
//! is deletion by id. Nothing derived is persisted, so neither recording nor
//! deleting touches any other table.

use crate::{
    entities::{Transaction, transaction},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Stock increase
    In,
    /// Stock decrease
    Out,
}

impl Movement {
    /// The canonical string form stored in the `movement_type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// Records a new stock movement and returns the stored model.
///
/// Validates that `quantity` is strictly positive and that the product is
/// present in the active catalog; the product's current name is snapshotted
/// onto the movement and never updated afterwards. The business `date` is
/// supplied by the caller, the `timestamp` is stamped here.
pub async fn record_movement(
    db: &DatabaseConnection,
    date: chrono::NaiveDate,
    product_id: i64,
    movement: Movement,
    quantity: i64,
    worker_id: Option<String>,
) -> Result<transaction::Model> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let product = crate::core::product::get_product_by_id(db, product_id)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;

    let now = chrono::Utc::now();
    let movement_model = transaction::ActiveModel {
        date: Set(date),
        product_id: Set(product_id),
        product_name: Set(product.name),
        movement_type: Set(movement.as_str().to_string()),
        quantity: Set(quantity),
        timestamp: Set(now),
        worker_id: Set(worker_id),
        ..Default::default()
    };

    movement_model.insert(db).await.map_err(Into::into)
}

/// Retrieves the full movement history in display order: newest business
/// date first, creation instant as the tie-breaker within a date.
///
/// Aggregation never relies on this ordering; it is the order the history
/// screen shows.
pub async fn list_movements(db: &DatabaseConnection) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .order_by_desc(transaction::Column::Date)
        .order_by_desc(transaction::Column::Timestamp)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific movement by its unique ID.
pub async fn get_movement_by_id(
    db: &DatabaseConnection,
    movement_id: i64,
) -> Result<Option<transaction::Model>> {
    Transaction::find_by_id(movement_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes a movement by id.
///
/// Movements cannot be edited, so deletion is the only correction
/// mechanism. Derived matrices are recomputed from the remaining history on
/// the next report, so no compensating writes happen here.
pub async fn delete_movement(db: &DatabaseConnection, movement_id: i64) -> Result<()> {
    let movement = Transaction::find_by_id(movement_id)
        .one(db)
        .await?
        .ok_or(Error::MovementNotFound { id: movement_id })?;

    movement.delete(db).await?;
    Ok(())
}
