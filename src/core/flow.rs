//! Flow matrix builder.
//!
//! Groups an unordered movement history into a dense date×product grid of
//! signed net quantities. The date axis is the set of distinct movement
//! dates in ascending order; the column set is the catalog plus every
//! product id referenced by a movement, so history for products that have
//! left the catalog is never dropped.

use crate::core::transaction::Movement;
use crate::entities::{product, transaction};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Net signed quantity change per product per date.
///
/// Every row is dense over the full column set: a cell of 0 means "no net
/// movement", whether or not any movement was recorded for that product
/// that day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowMatrix {
    /// Rows keyed by date (ascending), each mapping product id to net quantity
    pub rows: BTreeMap<NaiveDate, BTreeMap<i64, i64>>,
    /// All product ids the matrix covers: active catalog plus every id
    /// referenced by a movement
    pub columns: BTreeSet<i64>,
}

impl FlowMatrix {
    /// Net quantity for one cell; 0 for dates or products outside the matrix.
    #[must_use]
    pub fn net(&self, date: NaiveDate, product_id: i64) -> i64 {
        self.rows
            .get(&date)
            .and_then(|row| row.get(&product_id))
            .copied()
            .unwrap_or(0)
    }

    /// The date axis in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.keys().copied()
    }

    /// True when no movements were recorded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the flow matrix from a movement history and the current catalog.
///
/// The catalog only contributes column completeness; aggregation is keyed on
/// `product_id` alone. Movements referencing ids absent from `products` are
/// still counted. Multiple movements on the same date and product accumulate.
#[must_use]
pub fn build_flow_matrix(
    transactions: &[transaction::Model],
    products: &[product::Model],
) -> FlowMatrix {
    let mut columns: BTreeSet<i64> = products.iter().map(|p| p.id).collect();
    columns.extend(transactions.iter().map(|t| t.product_id));

    let mut rows: BTreeMap<NaiveDate, BTreeMap<i64, i64>> = BTreeMap::new();
    for t in transactions {
        rows.entry(t.date)
            .or_insert_with(|| columns.iter().map(|&id| (id, 0)).collect());
    }

    for t in transactions {
        let delta = if t.movement_type == Movement::In.as_str() {
            t.quantity
        } else {
            -t.quantity
        };
        if let Some(row) = rows.get_mut(&t.date) {
            *row.entry(t.product_id).or_insert(0) += delta;
        }
    }

    FlowMatrix { rows, columns }
}
