//! Product catalog business logic - Handles all catalog operations.
//!
//! This module provides functions for creating, listing, and removing
//! catalog products. Removal is a soft delete: the product disappears from
//! the selectable catalog while its movement history stays attributed to
//! its id. Products carry an optional sort code of the form `"MMM-SSS"`
//! (two 3-digit zero-padded segments); coded products order before uncoded
//! ones.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{Order, QueryOrder, Set, prelude::*, sea_query::NullOrdering};

/// Checks a product code against the `"MMM-SSS"` layout: three ASCII
/// digits, a hyphen, three ASCII digits.
#[must_use]
pub fn is_valid_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 7
        && bytes[3] == b'-'
        && bytes[..3].iter().all(u8::is_ascii_digit)
        && bytes[4..].iter().all(u8::is_ascii_digit)
}

/// Creates a new catalog product, performing input validation.
///
/// The name must be non-empty after trimming; the code, when given, must
/// match the `"MMM-SSS"` layout. The code carries no meaning beyond sort
/// and display order.
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    code: Option<String>,
) -> Result<product::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if let Some(ref code) = code {
        if !is_valid_code(code) {
            return Err(Error::InvalidProductCode { code: code.clone() });
        }
    }

    let now = chrono::Utc::now().naive_utc();

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        code: Set(code),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Retrieves the active catalog in display order: coded products first,
/// ascending by code, then uncoded products ascending by name.
///
/// Zero-padded code segments make the plain string ordering match the
/// numeric one.
pub async fn list_catalog(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::IsDeleted.eq(false))
        .order_by_with_nulls(product::Column::Code, Order::Asc, NullOrdering::Last)
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID, deleted or not.
///
/// History screens need to resolve removed products too; callers that only
/// want the selectable catalog filter on `is_deleted` themselves.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an active product by its exact name.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .filter(product::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Removes a product from the selectable catalog via soft delete.
///
/// Historical movements keep referencing the product id and continue to be
/// aggregated; only the catalog entry disappears.
pub async fn remove_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let product = get_product_by_id(db, product_id)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;

    let mut active_model: product::ActiveModel = product.into();
    active_model.is_deleted = Set(true);
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());
    active_model.update(db).await.map_err(Into::into)
}

/// Seeds the catalog from a configuration list, skipping names that
/// already exist as active products. Returns the number of products
/// created.
pub async fn seed_catalog(
    db: &DatabaseConnection,
    config: &crate::config::catalog::CatalogConfig,
) -> Result<usize> {
    let mut created = 0;
    for seed in &config.products {
        if get_product_by_name(db, &seed.name).await?.is_some() {
            continue;
        }
        create_product(db, seed.name.clone(), seed.code.clone()).await?;
        created += 1;
    }
    Ok(created)
}
