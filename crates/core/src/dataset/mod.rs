//! Dataset layout, configuration and loading.
//!
//! A dataset is a directory holding:
//! - `.flowrisk/dataset.json`: `DatasetConfig` (file locations + query defaults).
//! - `data/`: default home of the flow, industry and country documents.
//! - `reports/`: exported report bundles.
//!
//! The analysis itself only needs a [`FlowData`]; everything else here is
//! about getting one from disk.

pub mod config;
pub mod context;
pub mod layout;
pub mod loader;
pub mod util;

pub use config::{DatasetConfig, DatasetFiles, QueryDefaults};
pub use context::DatasetContext;
pub use layout::DatasetLayout;
pub use loader::{
    load_flow_data, read_document, read_flow_table, read_records, DataSource, DocumentFormat,
    FileDataSource, RawCountry, RawFlowTable, RawIndustry,
};
pub use util::{load_dataset_config, open_dataset};

use crate::model::{CountryRegistry, IndustryRegistry};
use crate::table::FlowTable;

/// The loaded, indexed flow table plus its two registries.
///
/// Immutable after load; share it read-only across requests.
#[derive(Debug, Clone, Default)]
pub struct FlowData {
    pub table: FlowTable,
    pub countries: CountryRegistry,
    pub industries: IndustryRegistry,
}
