//! Running stock projection.
//!
//! Turns the flow matrix into cumulative per-product stock levels: a
//! left-to-right prefix sum over the date axis, independent per product.
//! Dates with no recorded movements are not materialized as rows; their
//! conceptual stock is the last row at or before them, exposed through the
//! carry-forward lookups on [`StockMatrix`].

use crate::core::flow::FlowMatrix;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Cumulative stock per product as of end of each axis date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockMatrix {
    /// Rows keyed by date (ascending), each mapping product id to the
    /// cumulative stock after that day's movements
    pub rows: BTreeMap<NaiveDate, BTreeMap<i64, i64>>,
    /// Same column set as the flow matrix the stock was projected from
    pub columns: BTreeSet<i64>,
}

impl StockMatrix {
    /// Stock level for one cell; 0 for dates or products outside the matrix.
    #[must_use]
    pub fn stock(&self, date: NaiveDate, product_id: i64) -> i64 {
        self.rows
            .get(&date)
            .and_then(|row| row.get(&product_id))
            .copied()
            .unwrap_or(0)
    }

    /// The stock row recorded exactly on `date`, if any.
    #[must_use]
    pub fn row(&self, date: NaiveDate) -> Option<&BTreeMap<i64, i64>> {
        self.rows.get(&date)
    }

    /// The latest recorded row at or before `date` - the carry-forward
    /// stock level for a day without movements.
    #[must_use]
    pub fn last_row_on_or_before(&self, date: NaiveDate) -> Option<&BTreeMap<i64, i64>> {
        self.rows.range(..=date).next_back().map(|(_, row)| row)
    }

    /// The latest recorded row strictly before `date`.
    #[must_use]
    pub fn last_row_before(&self, date: NaiveDate) -> Option<&BTreeMap<i64, i64>> {
        self.rows.range(..date).next_back().map(|(_, row)| row)
    }
}

/// Projects cumulative stock from the flow matrix.
///
/// Walks the date axis ascending with a per-product accumulator that starts
/// at 0 for every column; each date's flow is added and the post-addition
/// accumulator becomes that date's stock row.
#[must_use]
pub fn project_stock(flow: &FlowMatrix) -> StockMatrix {
    let mut running: BTreeMap<i64, i64> = flow.columns.iter().map(|&id| (id, 0)).collect();
    let mut rows: BTreeMap<NaiveDate, BTreeMap<i64, i64>> = BTreeMap::new();

    for (&date, flow_row) in &flow.rows {
        for (&product_id, &net) in flow_row {
            *running.entry(product_id).or_insert(0) += net;
        }
        rows.insert(date, running.clone());
    }

    StockMatrix {
        rows,
        columns: flow.columns.clone(),
    }
}
