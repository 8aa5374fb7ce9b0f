//! Product entity - Represents catalog entries movements are recorded against.
//!
//! Each product has a required display name and an optional structured sort
//! code (`"MMM-SSS"`, two 3-digit zero-padded segments). Removing a product
//! from the catalog is a soft delete: the row stays so historical movements
//! keep their reference, it just stops being selectable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product catalog database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, required and non-empty
    pub name: String,
    /// Optional sort/display code (`"001-002"` style); uncoded products
    /// order after all coded ones
    pub code: Option<String>,
    /// Soft delete flag - if true, product is hidden from the catalog but
    /// its movement history is preserved
    pub is_deleted: bool,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A product has many movements
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
