use std::path::Path;

use anyhow::Result;

use crate::dataset::{open_dataset, DatasetConfig, DatasetLayout, FlowData};

/// Convenience wrapper bundling layout, config and the loaded data.
#[derive(Debug)]
pub struct DatasetContext {
    pub layout: DatasetLayout,
    pub config: DatasetConfig,
    pub data: FlowData,
}

impl DatasetContext {
    /// Load the dataset config and data for a given root.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self> {
        let layout = DatasetLayout::new(root);
        let (config, data) = open_dataset(&layout)?;
        Ok(Self { layout, config, data })
    }
}
