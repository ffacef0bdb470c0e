use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::CompositeKey;
use crate::table::{FlowResult, FlowTable};

/// One ranked supplier: source pair and the flow it sends to the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierEntry {
    pub source: CompositeKey,
    pub value: f64,
}

/// Ranked suppliers of a target country-industry pair.
///
/// All values are strictly positive. The top-K part is ordered by
/// descending value; domestic rows added for an industry breakdown follow it.
/// An empty selection means "no positive inflows", which is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierSelection {
    pub target: CompositeKey,
    pub entries: Vec<SupplierEntry>,
}

impl SupplierSelection {
    pub fn empty(target: CompositeKey) -> Self {
        Self { target, entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SupplierEntry> {
        self.entries.iter()
    }

    /// Value recorded for `source`, if it is part of the selection.
    pub fn get(&self, source: &CompositeKey) -> Option<f64> {
        self.entries.iter().find(|e| &e.source == source).map(|e| e.value)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// Distinct source countries in order of first appearance.
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            let country = entry.source.country.as_str();
            if !seen.contains(&country) {
                seen.push(country);
            }
        }
        seen
    }

    /// Distinct source industries, sorted by code.
    pub fn industries(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.source.industry.as_str()).collect()
    }
}

/// Select the `depth` largest foreign suppliers of `target_country_target_industry`.
///
/// Sources from `target_country` are removed before ranking. Ties keep table
/// row order. With `include_domestic_breakdown`, the target country's own
/// value is appended once for every industry present in the top-K, in
/// industry-code order.
///
/// Fails with `NotFound` only when the target column does not exist.
pub fn select_top_inputs(
    table: &FlowTable,
    target_industry: &str,
    depth: usize,
    target_country: &str,
    include_domestic_breakdown: bool,
) -> FlowResult<SupplierSelection> {
    let target = CompositeKey::new(target_country, target_industry);
    let positive: Vec<SupplierEntry> = table
        .column_flows(target_country, target_industry)?
        .filter(|(_, value)| *value > 0.0)
        .map(|(source, value)| SupplierEntry { source: source.clone(), value })
        .collect();

    let mut ranked: Vec<SupplierEntry> =
        positive.iter().filter(|e| !e.source.is_domestic_to(target_country)).cloned().collect();
    // `sort_by` is stable, so equal values stay in row order.
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked.truncate(depth);

    let mut selection = SupplierSelection { target, entries: ranked };
    if include_domestic_breakdown {
        append_domestic_breakdown(&mut selection, &positive, target_country);
    }

    debug!(
        pair = %selection.target,
        depth,
        include_domestic_breakdown,
        candidates = positive.len(),
        selected = selection.len(),
        "Selected top inputs"
    );
    Ok(selection)
}

/// Append the target country's own inflow for each industry already in the
/// selection. Industries are visited in code order and appended at most once.
fn append_domestic_breakdown(
    selection: &mut SupplierSelection,
    positive: &[SupplierEntry],
    target_country: &str,
) {
    let industries: Vec<String> = selection.industries().into_iter().map(str::to_string).collect();
    for industry in industries {
        let domestic = positive
            .iter()
            .find(|e| e.source.is_domestic_to(target_country) && e.source.industry == industry);
        if let Some(entry) = domestic {
            selection.entries.push(entry.clone());
        }
    }
}

/// For every primary supplier, select that supplier's own top inputs.
///
/// Each supplier is treated as an importer in its own right: its domestic
/// sources are excluded and no breakdown rows are added. Results follow the
/// primary ranking order.
pub fn select_secondary_inputs(
    table: &FlowTable,
    primary: &SupplierSelection,
    depth: usize,
) -> FlowResult<Vec<SupplierSelection>> {
    primary
        .iter()
        .map(|entry| {
            select_top_inputs(table, &entry.source.industry, depth, &entry.source.country, false)
        })
        .collect()
}
