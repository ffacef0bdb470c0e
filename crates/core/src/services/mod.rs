//! Analysis services built on top of the flow table.
//!
//! - `selection`: top-K supplier selection (plus domestic breakdown and
//!   secondary expansion).
//! - `risk`: per-industry concentration metrics.
//! - `weights`: country risk weights and the per-session override store.
//! - `aggregate`: totals, country shares, options and map links.
//! - `heatmap`: bilateral industry-by-industry submatrix.
//! - `reports`: composite bundles for summary, risk and map views.

pub mod aggregate;
pub mod heatmap;
pub mod reports;
pub mod risk;
pub mod selection;
pub mod weights;
