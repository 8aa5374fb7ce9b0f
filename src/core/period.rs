//! Period maximum aggregation.
//!
//! Storage-fee billing charges for the peak stock held within each of the
//! three fixed settlement windows of a month: days 1-10, 11-20 and 21-end.
//! The walk is seeded with the stock carried in from the last recorded date
//! before the month, so a month with no movements still bills the level
//! carried over from prior activity.

use crate::core::stock::StockMatrix;
use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Last day of the first settlement term.
pub const TERM1_END_DAY: u32 = 10;
/// Last day of the second settlement term; the third term runs to month end.
pub const TERM2_END_DAY: u32 = 20;

/// The month an invoice is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    first_day: NaiveDate,
}

impl ReportMonth {
    /// Creates a report month, validating `month` is in 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(Error::InvalidReportMonth { month })?;
        Ok(Self { first_day })
    }

    /// The first calendar day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first_day
    }

    /// The year of the report month.
    #[must_use]
    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    /// The month number, 1-12.
    #[must_use]
    pub fn month(self) -> u32 {
        self.first_day.month()
    }

    /// Number of calendar days in the month; leap years come out of the
    /// calendar type, not hand arithmetic.
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        let (next_year, next_month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .map_or(31, |last_day| last_day.day())
    }
}

impl std::fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Peak stock per settlement term for one product.
///
/// The three values are independent maxima; no ordering between them is
/// implied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermMaxima {
    /// Peak stock during days 1-10
    pub term1: i64,
    /// Peak stock during days 11-20
    pub term2: i64,
    /// Peak stock during day 21 to month end
    pub term3: i64,
}

impl TermMaxima {
    /// Sum of the three term peaks - the quantity basis for the fee line.
    #[must_use]
    pub const fn total(self) -> i64 {
        self.term1 + self.term2 + self.term3
    }
}

/// Computes the per-product term maxima for `month`.
///
/// The stock matrix must cover the entire movement history, not just the
/// target month: the seed row is the last one strictly before the month,
/// and within the month the level only changes on dates present in the
/// axis (carry-forward on all other days).
#[must_use]
pub fn period_maxima(stock: &StockMatrix, month: ReportMonth) -> BTreeMap<i64, TermMaxima> {
    let mut result: BTreeMap<i64, TermMaxima> = stock
        .columns
        .iter()
        .map(|&id| (id, TermMaxima::default()))
        .collect();

    let mut last_known: BTreeMap<i64, i64> =
        stock.columns.iter().map(|&id| (id, 0)).collect();
    if let Some(row) = stock.last_row_before(month.first_day()) {
        for (&id, &level) in row {
            last_known.insert(id, level);
        }
    }

    for day in 1..=month.days_in_month() {
        let Some(date) = month.first_day().with_day(day) else {
            continue;
        };
        if let Some(row) = stock.row(date) {
            for (&id, &level) in row {
                last_known.insert(id, level);
            }
        }

        for (id, maxima) in &mut result {
            let level = last_known.get(id).copied().unwrap_or(0);
            if day <= TERM1_END_DAY {
                maxima.term1 = maxima.term1.max(level);
            } else if day <= TERM2_END_DAY {
                maxima.term2 = maxima.term2.max(level);
            } else {
                maxima.term3 = maxima.term3.max(level);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flow::build_flow_matrix;
    use crate::core::stock::project_stock;
    use crate::core::transaction::Movement;
    use crate::test_utils::{make_movement, make_product};

    fn month(year: i32, month_no: u32) -> ReportMonth {
        ReportMonth::new(year, month_no).expect("valid month")
    }

    fn widget_stock() -> crate::core::stock::StockMatrix {
        let products = vec![make_product(1, "Widget")];
        let transactions = vec![
            make_movement(1, "2024-01-05", 1, Movement::In, 10),
            make_movement(2, "2024-01-15", 1, Movement::Out, 3),
            make_movement(3, "2024-01-25", 1, Movement::In, 2),
        ];
        project_stock(&build_flow_matrix(&transactions, &products))
    }

    #[test]
    fn test_report_month_rejects_out_of_range() {
        assert!(matches!(
            ReportMonth::new(2024, 0),
            Err(crate::errors::Error::InvalidReportMonth { month: 0 })
        ));
        assert!(matches!(
            ReportMonth::new(2024, 13),
            Err(crate::errors::Error::InvalidReportMonth { month: 13 })
        ));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(month(2024, 1).days_in_month(), 31);
        assert_eq!(month(2024, 4).days_in_month(), 30);
        assert_eq!(month(2023, 2).days_in_month(), 28);
        // Leap year
        assert_eq!(month(2024, 2).days_in_month(), 29);
        // December rolls the year for the "first of next month" computation
        assert_eq!(month(2024, 12).days_in_month(), 31);
    }

    #[test]
    fn test_report_month_display() {
        assert_eq!(month(2024, 2).to_string(), "2024-02");
    }

    #[test]
    fn test_terms_within_active_month() {
        let maxima = period_maxima(&widget_stock(), month(2024, 1));
        let widget = maxima.get(&1).copied().expect("widget present");

        assert_eq!(widget.term1, 10);
        assert_eq!(widget.term2, 7);
        assert_eq!(widget.term3, 9);
        assert_eq!(widget.total(), 26);
    }

    #[test]
    fn test_carry_forward_into_empty_month() {
        // No February movements: every term bills January's closing level
        let maxima = period_maxima(&widget_stock(), month(2024, 2));
        let widget = maxima.get(&1).copied().expect("widget present");

        assert_eq!(widget.term1, 9);
        assert_eq!(widget.term2, 9);
        assert_eq!(widget.term3, 9);
    }

    #[test]
    fn test_month_before_any_history_is_zero() {
        let maxima = period_maxima(&widget_stock(), month(2023, 12));
        let widget = maxima.get(&1).copied().expect("widget present");

        assert_eq!(widget, TermMaxima::default());
    }

    #[test]
    fn test_term_boundary_days() {
        let products = vec![make_product(1, "Widget")];
        // Stock rises to 5 on day 10, to 8 on day 11, drops to 1 on day 21
        let transactions = vec![
            make_movement(1, "2024-03-10", 1, Movement::In, 5),
            make_movement(2, "2024-03-11", 1, Movement::In, 3),
            make_movement(3, "2024-03-21", 1, Movement::Out, 7),
        ];
        let stock = project_stock(&build_flow_matrix(&transactions, &products));
        let widget = period_maxima(&stock, month(2024, 3))
            .get(&1)
            .copied()
            .expect("widget present");

        assert_eq!(widget.term1, 5);
        assert_eq!(widget.term2, 8);
        // Day 21 onwards carries 1, but the term max never undercuts a
        // single day in its range
        assert_eq!(widget.term3, 1);
    }

    #[test]
    fn test_peak_not_ending_balance() {
        let products = vec![make_product(1, "Widget")];
        let transactions = vec![
            make_movement(1, "2024-05-02", 1, Movement::In, 10),
            make_movement(2, "2024-05-03", 1, Movement::Out, 9),
        ];
        let stock = project_stock(&build_flow_matrix(&transactions, &products));
        let widget = period_maxima(&stock, month(2024, 5))
            .get(&1)
            .copied()
            .expect("widget present");

        // The term bills the peak (10), not the ending balance (1)
        assert_eq!(widget.term1, 10);
    }

    #[test]
    fn test_product_with_no_movements_is_present_with_zeros() {
        let products = vec![make_product(1, "Widget"), make_product(2, "Gadget")];
        let transactions = vec![make_movement(1, "2024-01-05", 1, Movement::In, 10)];
        let stock = project_stock(&build_flow_matrix(&transactions, &products));
        let maxima = period_maxima(&stock, month(2024, 1));

        assert_eq!(maxima.get(&2).copied(), Some(TermMaxima::default()));
    }

    #[test]
    fn test_leap_day_is_billable() {
        let products = vec![make_product(1, "Widget")];
        // Stock appears only on Feb 29 of a leap year
        let transactions = vec![make_movement(1, "2024-02-29", 1, Movement::In, 6)];
        let stock = project_stock(&build_flow_matrix(&transactions, &products));
        let widget = period_maxima(&stock, month(2024, 2))
            .get(&1)
            .copied()
            .expect("widget present");

        assert_eq!(widget.term1, 0);
        assert_eq!(widget.term2, 0);
        assert_eq!(widget.term3, 6);
    }
}
