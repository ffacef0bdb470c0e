use serde::{Deserialize, Serialize};

use crate::dataset::DatasetLayout;

/// Importer preselected when none is given.
pub const DEFAULT_IMPORTER: &str = "NZL";
/// Industry preselected when none is given.
pub const DEFAULT_INDUSTRY: &str = "A01_02";
/// Number of top trading partners for ranking and map views.
pub const DEFAULT_DEPTH: usize = 10;
/// Depth used by the summary and risk views.
pub const DEFAULT_SUMMARY_DEPTH: usize = 50;

/// Locations of the three source documents (relative to the root or absolute).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetFiles {
    pub flows: String,
    pub industries: String,
    pub countries: String,
}

impl DatasetFiles {
    /// Default file locations for `layout`, stored relative to its root.
    pub fn for_layout(layout: &DatasetLayout) -> Self {
        Self {
            flows: layout.relative_string(&layout.flows_path),
            industries: layout.relative_string(&layout.industries_path),
            countries: layout.relative_string(&layout.countries_path),
        }
    }
}

/// Query parameters used when a frontend does not supply its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDefaults {
    pub importer: String,
    pub industry: String,
    pub depth: usize,
    pub summary_depth: usize,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            importer: DEFAULT_IMPORTER.to_string(),
            industry: DEFAULT_INDUSTRY.to_string(),
            depth: DEFAULT_DEPTH,
            summary_depth: DEFAULT_SUMMARY_DEPTH,
        }
    }
}

/// Serializable configuration describing a dataset.
///
/// This lives at `.flowrisk/dataset.json` in the dataset root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Human-friendly dataset name.
    pub name: String,
    /// Optional description / provenance notes.
    pub description: Option<String>,
    /// Schema/config version. This is about the config format, not the data vintage.
    pub config_version: String,
    /// Where the source documents live.
    pub files: DatasetFiles,
    #[serde(default)]
    pub defaults: QueryDefaults,
}

impl DatasetConfig {
    /// Create a configuration using the default file locations of `layout`.
    pub fn new(name: impl Into<String>, layout: &DatasetLayout) -> Self {
        Self {
            name: name.into(),
            description: None,
            config_version: "0.1.0".to_string(),
            files: DatasetFiles::for_layout(layout),
            defaults: QueryDefaults::default(),
        }
    }
}
