//! Invoice calculation.
//!
//! Prices the period maxima: each product's fee line is the sum of its three
//! term peaks multiplied by the global unit price, and the invoice total is
//! the sum of the lines. All amounts are [`Money`].

use crate::core::money::Money;
use crate::core::period::TermMaxima;
use std::collections::BTreeMap;

/// One fee line of the storage invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLine {
    /// Product the line bills for
    pub product_id: i64,
    /// Display name: the catalog name, or the denormalized movement name
    /// for products no longer in the catalog
    pub product_name: String,
    /// The three term peaks the line is based on
    pub maxima: TermMaxima,
    /// `maxima.total() × unit_price`
    pub amount: Money,
}

/// The storage-fee invoice for one report month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    /// Unit price the lines were computed with
    pub unit_price: Money,
    /// One line per matrix column, in the caller-supplied label order
    pub lines: Vec<InvoiceLine>,
    /// Sum of all line amounts
    pub total: Money,
}

/// Builds the invoice from labeled columns and their term maxima.
///
/// `labels` fixes both the line order and the display names; a label
/// without a maxima entry yields an all-zero line rather than being
/// skipped.
#[must_use]
pub fn build_invoice(
    labels: &[(i64, String)],
    maxima: &BTreeMap<i64, TermMaxima>,
    unit_price: Money,
) -> Invoice {
    let mut lines = Vec::with_capacity(labels.len());
    let mut total = Money::zero();

    for (product_id, product_name) in labels {
        let product_maxima = maxima.get(product_id).copied().unwrap_or_default();
        let amount = unit_price * product_maxima.total();
        total += amount;
        lines.push(InvoiceLine {
            product_id: *product_id,
            product_name: product_name.clone(),
            maxima: product_maxima,
            amount,
        });
    }

    Invoice {
        unit_price,
        lines,
        total,
    }
}
