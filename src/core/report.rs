//! Report generation business logic.
//!
//! Home of the explicit recomputation pipeline: [`derive()`] is a pure
//! function from a complete input snapshot (movement history, catalog,
//! unit price, report month) to the full derived state, and
//! [`generate_monthly_report`] is the store-backed wrapper that loads the
//! snapshot and derives from it. Callers re-invoke it whenever any input
//! changes; there is no subscription machinery and nothing is cached.

use crate::{
    core::{
        flow::{FlowMatrix, build_flow_matrix},
        invoice::{Invoice, build_invoice},
        money::Money,
        period::{ReportMonth, TermMaxima, period_maxima},
        stock::{StockMatrix, project_stock},
    },
    entities::{Transaction, product, transaction},
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Everything the pipeline derives from one input snapshot.
///
/// Recomputed from scratch on every invocation; two runs over identical
/// inputs compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedState {
    /// The month the period maxima and invoice cover
    pub month: ReportMonth,
    /// Date×product net movement grid over the full history
    pub flow: FlowMatrix,
    /// Cumulative stock per product per axis date
    pub stock: StockMatrix,
    /// Per-product term peaks for the report month
    pub maxima: BTreeMap<i64, TermMaxima>,
    /// The priced storage-fee invoice
    pub invoice: Invoice,
}

/// Runs the full aggregation pipeline over one input snapshot.
///
/// The flow and stock matrices cover the entire history regardless of the
/// report month; only the period maxima and invoice are scoped to `month`.
/// Invoice lines follow the catalog order of `products`, with columns for
/// products no longer in the catalog appended after, labeled from their
/// most recent movement's denormalized name.
#[must_use]
pub fn derive(
    transactions: &[transaction::Model],
    products: &[product::Model],
    unit_price: Money,
    month: ReportMonth,
) -> DerivedState {
    let flow = build_flow_matrix(transactions, products);
    let stock = project_stock(&flow);
    let maxima = period_maxima(&stock, month);
    let labels = column_labels(transactions, products);
    let invoice = build_invoice(&labels, &maxima, unit_price);

    DerivedState {
        month,
        flow,
        stock,
        maxima,
        invoice,
    }
}

/// Ordered `(product_id, display name)` pairs: catalog products in the
/// given order, then orphaned ids ascending, each labeled from the latest
/// movement that referenced it.
fn column_labels(
    transactions: &[transaction::Model],
    products: &[product::Model],
) -> Vec<(i64, String)> {
    let mut labels: Vec<(i64, String)> =
        products.iter().map(|p| (p.id, p.name.clone())).collect();

    let catalog_ids: BTreeSet<i64> = products.iter().map(|p| p.id).collect();
    let mut orphans: BTreeMap<i64, &transaction::Model> = BTreeMap::new();
    for t in transactions {
        if catalog_ids.contains(&t.product_id) {
            continue;
        }
        let latest = orphans.entry(t.product_id).or_insert(t);
        if (t.date, t.timestamp) > (latest.date, latest.timestamp) {
            *latest = t;
        }
    }

    labels.extend(
        orphans
            .into_iter()
            .map(|(id, t)| (id, t.product_name.clone())),
    );
    labels
}

/// Loads a complete snapshot from the store and derives the report for
/// `month`.
pub async fn generate_monthly_report(
    db: &DatabaseConnection,
    month: ReportMonth,
) -> Result<DerivedState> {
    let transactions = Transaction::find().all(db).await?;
    let products = crate::core::product::list_catalog(db).await?;
    let settings = crate::core::settings::get_or_create_settings(db).await?;

    debug!(
        movement_count = transactions.len(),
        catalog_count = products.len(),
        %month,
        "deriving monthly report"
    );

    Ok(derive(
        &transactions,
        &products,
        crate::core::settings::unit_price(&settings),
        month,
    ))
}

/// Formats a derived report into a human-readable summary string, one
/// invoice line per product plus the total.
#[must_use]
pub fn format_invoice_summary(state: &DerivedState) -> String {
    use std::fmt::Write;

    let mut summary = format!(
        "Storage invoice {} - unit price {}\n",
        state.month, state.invoice.unit_price
    );

    for line in &state.invoice.lines {
        // write! is infallible when writing to String, so unwrap is safe
        writeln!(
            summary,
            "  {} | 1-10: {} | 11-20: {} | 21-end: {} | qty {} | {}",
            line.product_name,
            line.maxima.term1,
            line.maxima.term2,
            line.maxima.term3,
            line.maxima.total(),
            line.amount
        )
        .unwrap();
    }

    writeln!(summary, "Total: {}", state.invoice.total).unwrap();
    summary
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::transaction::Movement;
    use crate::test_utils::{
        create_test_movement, create_test_product, date, make_movement, make_product,
        setup_test_db,
    };

    fn january() -> ReportMonth {
        ReportMonth::new(2024, 1).expect("valid month")
    }

    #[test]
    fn test_derive_runs_the_whole_pipeline() {
        let products = vec![make_product(1, "Widget")];
        let transactions = vec![
            make_movement(1, "2024-01-05", 1, Movement::In, 10),
            make_movement(2, "2024-01-15", 1, Movement::Out, 3),
            make_movement(3, "2024-01-25", 1, Movement::In, 2),
        ];

        let state = derive(
            &transactions,
            &products,
            Money::from_minor(400),
            january(),
        );

        assert_eq!(state.flow.net(date("2024-01-05"), 1), 10);
        assert_eq!(state.stock.stock(date("2024-01-25"), 1), 9);
        let widget = state.maxima.get(&1).copied().unwrap();
        assert_eq!((widget.term1, widget.term2, widget.term3), (10, 7, 9));
        // (10 + 7 + 9) × 400
        assert_eq!(state.invoice.total, Money::from_minor(10_400));
    }

    #[test]
    fn test_derive_is_idempotent() {
        let products = vec![make_product(1, "Widget"), make_product(2, "Gadget")];
        let transactions = vec![
            make_movement(1, "2024-01-05", 1, Movement::In, 10),
            make_movement(2, "2024-01-15", 2, Movement::In, 4),
        ];

        let first = derive(
            &transactions,
            &products,
            Money::from_minor(400),
            january(),
        );
        let second = derive(
            &transactions,
            &products,
            Money::from_minor(400),
            january(),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_snapshot_derives_empty_state() {
        let state = derive(&[], &[], Money::from_minor(400), january());

        assert!(state.flow.is_empty());
        assert!(state.stock.rows.is_empty());
        assert!(state.maxima.is_empty());
        assert_eq!(state.invoice.total, Money::zero());
    }

    #[test]
    fn test_orphan_lines_use_denormalized_name() {
        // Product 99 is missing from the catalog snapshot; its line is
        // labeled from its latest movement
        let products = vec![make_product(1, "Widget")];
        let mut early = make_movement(1, "2024-01-05", 99, Movement::In, 5);
        early.product_name = "Old Name".to_string();
        let mut late = make_movement(2, "2024-01-20", 99, Movement::In, 1);
        late.product_name = "New Name".to_string();

        let state = derive(
            &[early, late],
            &products,
            Money::from_minor(400),
            january(),
        );

        assert_eq!(state.invoice.lines.len(), 2);
        let orphan = &state.invoice.lines[1];
        assert_eq!(orphan.product_id, 99);
        assert_eq!(orphan.product_name, "New Name");
        // Peak 5 in term1, 5 carried into term2 then 6, 6 in term3
        assert_eq!(orphan.maxima.total(), 5 + 6 + 6);
    }

    #[test]
    fn test_inconsistent_snapshot_is_tolerated() {
        // A movement referencing a product id absent from the product
        // snapshot must not be dropped
        let transactions = vec![make_movement(1, "2024-01-05", 42, Movement::In, 3)];
        let state = derive(&transactions, &[], Money::from_minor(400), january());

        assert_eq!(state.flow.net(date("2024-01-05"), 42), 3);
        assert_eq!(state.invoice.lines.len(), 1);
    }

    #[tokio::test]
    async fn test_generate_monthly_report_from_store() -> Result<()> {
        let db = setup_test_db().await?;
        let widget = create_test_product(&db, "Widget").await?;
        create_test_movement(&db, widget.id, "2024-01-05", Movement::In, 10).await?;
        create_test_movement(&db, widget.id, "2024-01-15", Movement::Out, 3).await?;
        create_test_movement(&db, widget.id, "2024-01-25", Movement::In, 2).await?;

        let state = generate_monthly_report(&db, january()).await?;

        // Default settings (unit price 400) are auto-created on first read
        assert_eq!(state.invoice.unit_price, Money::from_minor(400));
        assert_eq!(state.invoice.total, Money::from_minor(10_400));

        Ok(())
    }

    #[tokio::test]
    async fn test_report_keeps_removed_products() -> Result<()> {
        let db = setup_test_db().await?;
        let widget = create_test_product(&db, "Widget").await?;
        create_test_movement(&db, widget.id, "2024-01-05", Movement::In, 10).await?;
        crate::core::product::remove_product(&db, widget.id).await?;

        let state = generate_monthly_report(&db, january()).await?;

        // The catalog is empty but the orphaned history still bills
        assert_eq!(state.invoice.lines.len(), 1);
        assert_eq!(state.invoice.lines[0].product_name, "Widget");
        assert_eq!(state.flow.net(date("2024-01-05"), widget.id), 10);
        assert!(state.invoice.total > Money::zero());

        Ok(())
    }

    #[tokio::test]
    async fn test_carry_forward_across_months_from_store() -> Result<()> {
        let db = setup_test_db().await?;
        let widget = create_test_product(&db, "Widget").await?;
        create_test_movement(&db, widget.id, "2024-01-05", Movement::In, 10).await?;
        create_test_movement(&db, widget.id, "2024-01-15", Movement::Out, 3).await?;
        create_test_movement(&db, widget.id, "2024-01-25", Movement::In, 2).await?;

        let february = ReportMonth::new(2024, 2).expect("valid month");
        let state = generate_monthly_report(&db, february).await?;

        let maxima = state.maxima.get(&widget.id).copied().unwrap();
        assert_eq!((maxima.term1, maxima.term2, maxima.term3), (9, 9, 9));

        Ok(())
    }

    #[test]
    fn test_format_invoice_summary() {
        let products = vec![make_product(1, "Widget")];
        let transactions = vec![make_movement(1, "2024-01-05", 1, Movement::In, 10)];
        let state = derive(
            &transactions,
            &products,
            Money::from_minor(400),
            january(),
        );

        let summary = format_invoice_summary(&state);

        assert!(summary.contains("Storage invoice 2024-01"));
        assert!(summary.contains("unit price ¥400"));
        assert!(summary.contains("Widget"));
        // Peak 10 in every term: (10+10+10) × 400
        assert!(summary.contains("qty 30"));
        assert!(summary.contains("Total: ¥12,000"));
    }
}
