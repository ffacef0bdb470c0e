//! Composite bundles that chain selection, aggregation and scoring the way
//! each view of a frontend needs them.

use serde::{Deserialize, Serialize};

use crate::dataset::FlowData;
use crate::model::CompositeKey;
use crate::services::aggregate::{
    country_shares, flow_links, industry_totals, CountryShareBreakdown, FlowLink, GeoPoint,
    IndustryTotal,
};
use crate::services::risk::{score, score_unweighted, IndustryRiskMetrics};
use crate::services::selection::{select_secondary_inputs, select_top_inputs, SupplierSelection};
use crate::services::weights::RiskWeightStore;
use crate::table::FlowResult;

/// Inputs of one importer/industry pair, with the country split of one
/// chosen input industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoSummary {
    pub importer: String,
    pub importer_name: String,
    pub output_industry: String,
    pub output_industry_name: String,
    pub input_industry: String,
    pub input_industry_name: String,
    /// Value contributed by the input industry, rounded to 1 decimal.
    pub total: f64,
    pub industry_totals: Vec<IndustryTotal>,
    pub breakdown: CountryShareBreakdown,
}

/// Build the summary view. The selection includes the importer's own
/// contribution for each selected industry.
///
/// Returns `Ok(None)` when no input industry is picked or the picked one has
/// no entries.
pub fn build_io_summary(
    data: &FlowData,
    importer: &str,
    output_industry: &str,
    input_industry: &str,
    depth: usize,
) -> FlowResult<Option<IoSummary>> {
    if input_industry.is_empty() {
        return Ok(None);
    }
    let selection = select_top_inputs(&data.table, output_industry, depth, importer, true)?;
    let Some(breakdown) =
        country_shares(&selection, input_industry, &data.countries, &data.industries)
    else {
        return Ok(None);
    };

    Ok(Some(IoSummary {
        importer: importer.to_string(),
        importer_name: data.countries.name_or_code(importer).to_string(),
        output_industry: output_industry.to_string(),
        output_industry_name: data.industries.name_or_code(output_industry).to_string(),
        input_industry: input_industry.to_string(),
        input_industry_name: breakdown.industry_name.clone(),
        total: breakdown.total,
        industry_totals: industry_totals(&selection, &data.industries),
        breakdown,
    }))
}

/// One row of the effective weight table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRow {
    pub country: String,
    pub name: String,
    pub weight: f64,
}

/// Metrics for one industry, joined with its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryRiskRow {
    pub industry_name: String,
    #[serde(flatten)]
    pub metrics: IndustryRiskMetrics,
}

/// Weighted concentration profile of one importer/industry pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub importer: String,
    pub importer_name: String,
    pub industry: String,
    pub industry_name: String,
    pub weights: Vec<WeightRow>,
    pub metrics: Vec<IndustryRiskRow>,
}

/// Score the importer's inputs with the session's weight overrides.
///
/// The selection includes the importer's domestic rows, which the default
/// importer weight of `0.0` then removes from the weighted HHI unless the
/// caller overrides it.
pub fn build_risk_profile(
    data: &FlowData,
    importer: &str,
    industry: &str,
    depth: usize,
    store: &RiskWeightStore,
) -> FlowResult<RiskProfile> {
    let selection = select_top_inputs(&data.table, industry, depth, importer, true)?;
    let weights = store.effective_weights(selection.countries(), importer);

    let metrics = score(&selection, &weights)
        .into_iter()
        .map(|metrics| IndustryRiskRow {
            industry_name: data.industries.name_or_code(&metrics.industry).to_string(),
            metrics,
        })
        .collect();
    let weights = weights
        .iter()
        .map(|(country, weight)| WeightRow {
            country: country.to_string(),
            name: data.countries.name_or_code(country).to_string(),
            weight,
        })
        .collect();

    Ok(RiskProfile {
        importer: importer.to_string(),
        importer_name: data.countries.name_or_code(importer).to_string(),
        industry: industry.to_string(),
        industry_name: data.industries.name_or_code(industry).to_string(),
        weights,
        metrics,
    })
}

/// Options for the flow map view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowMapOptions {
    pub depth: usize,
    /// Also expand every primary supplier into its own top suppliers.
    pub secondary: bool,
    /// Scale link thickness by flow value.
    pub use_thickness: bool,
}

/// Supplier flows into one importer/industry pair, ready for a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowMap {
    pub target: CompositeKey,
    pub target_name: String,
    pub industry_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_location: Option<GeoPoint>,
    pub primary: SupplierSelection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<SupplierSelection>,
    pub links: Vec<FlowLink>,
    /// Unweighted concentration of the primary suppliers.
    pub concentration: Vec<IndustryRiskMetrics>,
}

/// Build the map view. Returns `Ok(None)` when the pair has no foreign
/// suppliers.
pub fn build_flow_map(
    data: &FlowData,
    importer: &str,
    industry: &str,
    options: FlowMapOptions,
) -> FlowResult<Option<FlowMap>> {
    let primary = select_top_inputs(&data.table, industry, options.depth, importer, false)?;
    if primary.is_empty() {
        return Ok(None);
    }
    let secondary = if options.secondary {
        select_secondary_inputs(&data.table, &primary, options.depth)?
    } else {
        Vec::new()
    };

    let mut selections = Vec::with_capacity(1 + secondary.len());
    selections.push(primary.clone());
    selections.extend(secondary.iter().cloned());
    let links = flow_links(&selections, &data.countries, &data.industries, options.use_thickness);

    let target_location = data
        .countries
        .get(importer)
        .and_then(|c| c.coordinates())
        .map(|(lat, lon)| GeoPoint { lat, lon });

    Ok(Some(FlowMap {
        target: primary.target.clone(),
        target_name: data.countries.name_or_code(importer).to_string(),
        industry_name: data.industries.name_or_code(industry).to_string(),
        target_location,
        concentration: score_unweighted(&primary),
        primary,
        secondary,
        links,
    }))
}
