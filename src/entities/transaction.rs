//! Transaction entity - Represents all stock movements in the system.
//!
//! Each transaction has a business `date` (the day the movement counts
//! against, distinct from `timestamp`), a `product_id`, a denormalized
//! `product_name` snapshot taken at creation time, a `movement_type`
//! (`"in"`/`"out"`), a positive `quantity`, and an optional `worker_id`.
//! Transactions are immutable once created; they can only be deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock movement database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the movement, assigned by the store
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Business day the movement is recorded against
    pub date: Date,
    /// ID of the product this movement refers to; kept even after the
    /// product leaves the catalog
    pub product_id: i64,
    /// Product name as it was when the movement was recorded; never updated
    pub product_name: String,
    /// Direction of the movement: `"in"` (stock increase) or `"out"` (stock decrease)
    pub movement_type: String,
    /// Moved quantity; always positive, the sign lives in `movement_type`
    pub quantity: i64,
    /// Creation instant; display-order tie-breaker only, never used for aggregation
    pub timestamp: DateTimeUtc,
    /// Optional opaque identifier of the worker who recorded the movement
    pub worker_id: Option<String>,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each movement refers to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
