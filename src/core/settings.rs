//! Global settings business logic.
//!
//! The settings record is a singleton holding the storage-fee unit price.
//! It is created with its default on first read, and price updates touch
//! only the price column. [`PriceEditor`] models the screen-side edit
//! buffer: a committed value that live snapshot refreshes may overwrite,
//! and a pending value they must not.

use crate::{
    core::money::Money,
    entities::{Settings, settings},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Reads the settings singleton, inserting the default record
/// (unit price 400) if none exists yet.
pub async fn get_or_create_settings(db: &DatabaseConnection) -> Result<settings::Model> {
    if let Some(existing) = Settings::find().one(db).await? {
        return Ok(existing);
    }

    let new_settings = settings::ActiveModel {
        unit_price: Set(settings::DEFAULT_UNIT_PRICE),
        updated_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    new_settings.insert(db).await.map_err(Into::into)
}

/// Persists a new unit price onto the singleton record.
///
/// Only the price and modification timestamp change; the record is created
/// first if it does not exist.
pub async fn update_unit_price(db: &DatabaseConnection, price: Money) -> Result<settings::Model> {
    if price.is_negative() {
        return Err(Error::InvalidUnitPrice {
            price: price.minor(),
        });
    }

    let current = get_or_create_settings(db).await?;
    let mut active_model: settings::ActiveModel = current.into();
    active_model.unit_price = Set(price.minor());
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());
    active_model.update(db).await.map_err(Into::into)
}

/// The unit price of a settings record as [`Money`].
#[must_use]
pub const fn unit_price(settings: &settings::Model) -> Money {
    Money::from_minor(settings.unit_price)
}

/// Two-state unit-price value: the committed price plus an optional
/// in-progress edit.
///
/// Store snapshot refreshes go through [`PriceEditor::apply_snapshot`],
/// which replaces the committed value but never the pending edit - the
/// buffer a user is typing into must not be clobbered by a push update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceEditor {
    committed: Money,
    pending: Option<Money>,
}

impl PriceEditor {
    /// Creates an editor over the given committed price, with no edit in
    /// progress.
    #[must_use]
    pub const fn new(committed: Money) -> Self {
        Self {
            committed,
            pending: None,
        }
    }

    /// The last committed price.
    #[must_use]
    pub const fn committed(&self) -> Money {
        self.committed
    }

    /// The in-progress edit, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<Money> {
        self.pending
    }

    /// Whether an edit is in progress.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts an edit, seeding the pending value from the committed one.
    pub fn begin_edit(&mut self) {
        self.pending = Some(self.committed);
    }

    /// Replaces the pending value. Ignored when no edit is in progress.
    pub fn set_pending(&mut self, price: Money) {
        if self.pending.is_some() {
            self.pending = Some(price);
        }
    }

    /// Discards the in-progress edit.
    pub fn cancel_edit(&mut self) {
        self.pending = None;
    }

    /// Applies a price arriving from a store snapshot: the committed value
    /// updates, the pending edit (if any) stays untouched.
    pub fn apply_snapshot(&mut self, price: Money) {
        self.committed = price;
    }

    /// Persists the pending edit and makes it the committed value.
    ///
    /// Returns the committed price; a commit with no edit in progress is a
    /// no-op.
    pub async fn commit(&mut self, db: &DatabaseConnection) -> Result<Money> {
        let Some(pending) = self.pending else {
            return Ok(self.committed);
        };

        update_unit_price(db, pending).await?;
        self.committed = pending;
        self.pending = None;
        Ok(self.committed)
    }
}
