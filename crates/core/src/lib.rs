//! flowrisk-core
//!
//! Core library for supplier-diversification analysis over inter-country
//! input-output (IO) tables.
//!
//! This crate defines the reference data model (composite keys, country and
//! industry registries), the indexed flow table, supplier selection,
//! concentration-risk scoring, aggregation for presentation, and the dataset
//! layout/loader used by frontends.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, web services, etc.).

pub mod model;
pub mod table;
pub mod services;
pub mod dataset;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
