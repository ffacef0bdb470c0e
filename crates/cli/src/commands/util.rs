use std::path::Path;

use anyhow::{anyhow, Context, Result};
use flowrisk_core::dataset::{DatasetContext, QueryDefaults};
use flowrisk_core::services::weights::RiskWeightStore;
use flowrisk_core::table::{FlowError, FlowResult};
use serde::Serialize;
use tracing::warn;

/// Load the dataset config and data for `root` (delegates to core helper).
pub fn load_context(root: &str) -> Result<DatasetContext> {
    let root_path = crate::canonicalize_or_current(root)?;
    DatasetContext::from_root(&root_path)
}

/// Country, industry and depth of one query after applying config defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryTarget {
    pub country: String,
    pub industry: String,
    pub depth: usize,
}

impl QueryTarget {
    /// Fill missing flags from `defaults`. `summary` picks the summary depth.
    pub fn resolve(
        defaults: &QueryDefaults,
        country: Option<&str>,
        industry: Option<&str>,
        depth: Option<usize>,
        summary: bool,
    ) -> Self {
        let default_depth = if summary { defaults.summary_depth } else { defaults.depth };
        Self {
            country: country.unwrap_or(&defaults.importer).to_string(),
            industry: industry.unwrap_or(&defaults.industry).to_string(),
            depth: depth.unwrap_or(default_depth),
        }
    }
}

/// Map a missing-key lookup to the user-facing "no data" error.
pub fn no_data_on_missing<T>(result: FlowResult<T>) -> Result<T> {
    result.map_err(|err| match err {
        FlowError::NotFound(key) => anyhow!("No data for this selection ({key})"),
        other => anyhow::Error::new(other),
    })
}

/// Split a `CODE=VALUE` argument. Either side may be missing.
pub fn parse_weight_arg(raw: &str) -> (Option<&str>, Option<&str>) {
    match raw.split_once('=') {
        Some((code, value)) => {
            let code = code.trim();
            let value = value.trim();
            ((!code.is_empty()).then_some(code), (!value.is_empty()).then_some(value))
        }
        None => ((!raw.trim().is_empty()).then_some(raw.trim()), None),
    }
}

/// Apply every `CODE=VALUE` override to `store`; invalid ones are skipped
/// with a warning. Returns the number applied.
pub fn apply_weight_args(store: &RiskWeightStore, args: &[String]) -> usize {
    let mut applied = 0;
    for raw in args {
        let (code, value) = parse_weight_arg(raw);
        if store.apply_raw_update(code, value) {
            applied += 1;
        } else {
            warn!(arg = raw.as_str(), "Ignoring invalid --weight (expected CODE=VALUE)");
        }
    }
    applied
}

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let serialized = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    println!("{}", serialized);
    Ok(())
}

/// Helper to print whether a directory exists.
pub fn print_dir_status(label: &str, path: &Path) {
    let exists = path.is_dir();
    println!("- {label}: {} ({})", if exists { "OK" } else { "MISSING" }, path.display());
}

/// Helper to print whether a file exists.
pub fn print_file_status(label: &str, path: &Path) {
    let exists = path.is_file();
    println!("- {label}: {} ({})", if exists { "OK" } else { "MISSING" }, path.display());
}

/// Format a flow value for tables.
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}
