//! Core business logic - framework-agnostic aggregation pipeline and
//! store-backed inventory operations.
//!
//! The pipeline modules (`flow`, `stock`, `period`, `invoice`, `report`) are
//! pure: given a movement history, a catalog and a unit price they derive the
//! same matrices and invoice every time. The remaining modules (`transaction`,
//! `product`, `settings`) are the write boundary against the store.

/// Flow matrix builder - date×product net movement grid
pub mod flow;
/// Invoice calculation from period maxima and the global unit price
pub mod invoice;
/// Integer minor-unit money type used for all fee arithmetic
pub mod money;
/// Period maximum aggregation over the three billing terms of a month
pub mod period;
/// Product catalog operations
pub mod product;
/// Report orchestration - snapshot loading and full-pipeline derivation
pub mod report;
/// Global settings operations and the unit-price edit buffer
pub mod settings;
/// Running stock projection from the flow matrix
pub mod stock;
/// Stock movement recording and history operations
pub mod transaction;
