//! Settings entity - Stores the single global settings record.
//!
//! Holds the storage-fee unit price in integer minor units. The record is
//! created with its default on first read, and updates touch only the
//! price column plus the modification timestamp.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage-fee unit price applied when no settings record exists yet,
/// in minor units
pub const DEFAULT_UNIT_PRICE: i64 = 400;

/// Global settings database model - a singleton row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    /// Unique identifier; only one row ever exists
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage fee per unit per month, in integer minor units
    pub unit_price: i64,
    /// When the settings were last modified
    pub updated_at: DateTime,
}

/// `Settings` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
