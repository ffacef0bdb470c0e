use anyhow::{Context, Result};

use crate::dataset::{load_flow_data, DatasetConfig, DatasetLayout, FileDataSource, FlowData};

/// Load the dataset config JSON from disk for a given layout.
pub fn load_dataset_config(layout: &DatasetLayout) -> Result<DatasetConfig> {
    let config_json = std::fs::read_to_string(&layout.config_path).with_context(|| {
        format!("Failed to read dataset config at {}", layout.config_path.display())
    })?;
    let config: DatasetConfig =
        serde_json::from_str(&config_json).context("Failed to parse dataset config JSON")?;
    Ok(config)
}

/// Resolve the configured file paths (relative or absolute) and load the data.
pub fn open_dataset(layout: &DatasetLayout) -> Result<(DatasetConfig, FlowData)> {
    let config = load_dataset_config(layout)?;
    let source = FileDataSource::new(
        layout.resolve(&config.files.flows),
        layout.resolve(&config.files.industries),
        layout.resolve(&config.files.countries),
    );
    let data = load_flow_data(&source)
        .with_context(|| format!("Failed to load dataset at {}", layout.root.display()))?;
    Ok((config, data))
}
