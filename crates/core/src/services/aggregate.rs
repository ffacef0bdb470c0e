//! Presentation-ready aggregates over a supplier selection.
//!
//! Nothing here builds visuals; every result is plain data that a renderer
//! (charts, tables, maps) consumes as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{CompositeKey, CountryRegistry, IndustryRegistry};
use crate::services::selection::SupplierSelection;

/// Upper bound for a flow link's thickness, reached by the largest flow.
pub const MAX_LINK_THICKNESS: f64 = 10.0;

/// Floor for a flow link's thickness.
pub const MIN_LINK_THICKNESS: f64 = 1.0;

/// Summed input value of one source industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryTotal {
    pub code: String,
    pub name: String,
    pub value: f64,
}

/// One country's slice of an industry's inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryShare {
    pub country: String,
    pub name: String,
    pub value: f64,
    /// `value / total * 100`, rounded to 2 decimals.
    pub percentage: f64,
}

/// Country shares within one source industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryShareBreakdown {
    pub industry: String,
    pub industry_name: String,
    /// Group total rounded to 1 decimal for display.
    pub total: f64,
    pub shares: Vec<CountryShare>,
}

/// A selectable source industry (code plus display label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryOption {
    pub code: String,
    pub label: String,
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A supplier -> receiver flow ready for map rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source: CompositeKey,
    pub source_name: String,
    pub source_industry_name: String,
    pub receiver: CompositeKey,
    pub receiver_name: String,
    pub value: f64,
    pub thickness: f64,
    pub start: GeoPoint,
    pub end: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Sum of selected values per source industry, ordered by industry code.
pub fn industry_totals(
    selection: &SupplierSelection,
    industries: &IndustryRegistry,
) -> Vec<IndustryTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for entry in selection.iter() {
        *totals.entry(entry.source.industry.as_str()).or_insert(0.0) += entry.value;
    }
    totals
        .into_iter()
        .map(|(code, value)| IndustryTotal {
            code: code.to_string(),
            name: industries.name_or_code(code).to_string(),
            value,
        })
        .collect()
}

/// Per-country percentages of the selected inputs from `industry`.
///
/// Returns `None` when the industry has no entries in the selection, which
/// callers render as a "no data" state. Shares follow selection order.
pub fn country_shares(
    selection: &SupplierSelection,
    industry: &str,
    countries: &CountryRegistry,
    industries: &IndustryRegistry,
) -> Option<CountryShareBreakdown> {
    let members: Vec<_> = selection.iter().filter(|e| e.source.industry == industry).collect();
    let total: f64 = members.iter().map(|e| e.value).sum();
    if members.is_empty() || total <= 0.0 {
        return None;
    }

    let shares = members
        .iter()
        .map(|e| CountryShare {
            country: e.source.country.clone(),
            name: countries.name_or_code(&e.source.country).to_string(),
            value: e.value,
            percentage: round_to(e.value / total * 100.0, 2),
        })
        .collect();

    Some(CountryShareBreakdown {
        industry: industry.to_string(),
        industry_name: industries.name_or_code(industry).to_string(),
        total: round_to(total, 1),
        shares,
    })
}

/// Distinct source industries of a selection, ordered by code.
///
/// The first option is the default pick for a breakdown view.
pub fn input_industry_options(
    selection: &SupplierSelection,
    industries: &IndustryRegistry,
) -> Vec<IndustryOption> {
    selection
        .industries()
        .into_iter()
        .map(|code| IndustryOption {
            code: code.to_string(),
            label: industries.name_or_code(code).to_string(),
        })
        .collect()
}

/// Map links for each selection's suppliers into its target.
///
/// Self links and countries without coordinates are skipped. With
/// `use_thickness`, a link's thickness scales with its value relative to the
/// largest flow of the same selection, floored at [`MIN_LINK_THICKNESS`].
pub fn flow_links(
    selections: &[SupplierSelection],
    countries: &CountryRegistry,
    industries: &IndustryRegistry,
    use_thickness: bool,
) -> Vec<FlowLink> {
    let mut links = Vec::new();
    for selection in selections {
        let receiver = &selection.target;
        let Some(end) = coordinates_of(countries, &receiver.country) else {
            continue;
        };
        let max_value = selection.iter().map(|e| e.value).fold(0.0_f64, f64::max);
        let max_value = if max_value > 0.0 { max_value } else { 1.0 };

        for entry in selection.iter() {
            if entry.source.country == receiver.country {
                continue;
            }
            let Some(start) = coordinates_of(countries, &entry.source.country) else {
                continue;
            };
            let thickness = if use_thickness {
                (entry.value / max_value * MAX_LINK_THICKNESS).max(MIN_LINK_THICKNESS)
            } else {
                MIN_LINK_THICKNESS
            };
            links.push(FlowLink {
                source: entry.source.clone(),
                source_name: countries.name_or_code(&entry.source.country).to_string(),
                source_industry_name: industries.name_or_code(&entry.source.industry).to_string(),
                receiver: receiver.clone(),
                receiver_name: countries.name_or_code(&receiver.country).to_string(),
                value: entry.value,
                thickness,
                start,
                end,
                color: countries.get(&entry.source.country).and_then(|c| c.color.clone()),
            });
        }
    }
    links
}

fn coordinates_of(countries: &CountryRegistry, code: &str) -> Option<GeoPoint> {
    countries.get(code).and_then(|c| c.coordinates()).map(|(lat, lon)| GeoPoint { lat, lon })
}
