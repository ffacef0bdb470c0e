use std::fs;

use anyhow::{Context, Result};
use flowrisk_core::services::reports::{
    build_flow_map, build_risk_profile, FlowMap, FlowMapOptions, IoSummary, RiskProfile,
};
use flowrisk_core::services::weights::RiskWeightStore;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commands::summary::summarize;
use crate::commands::{apply_weight_args, load_context, no_data_on_missing, print_json, QueryTarget};

/// Everything the dashboard views show for one importer/industry pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBundle {
    pub generated_at: String,
    pub dataset: String,
    pub query: ReportQuery,
    pub summary: Option<IoSummary>,
    pub risk: RiskProfile,
    pub flows: Option<FlowMap>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    pub country: String,
    pub industry: String,
    /// Depth used by the summary and risk sections.
    pub summary_depth: usize,
    /// Depth used by the flow map section.
    pub depth: usize,
}

/// Write `reports/<COUNTRY>_<INDUSTRY>.json` with summary, risk and flows.
pub fn export_report_command(
    root: &str,
    country: Option<&str>,
    industry: Option<&str>,
    weights: &[String],
    json: bool,
) -> Result<()> {
    let ctx = load_context(root)?;
    let defaults = &ctx.config.defaults;
    let summary_query = QueryTarget::resolve(defaults, country, industry, None, true);
    let map_query = QueryTarget::resolve(defaults, country, industry, None, false);

    let store = RiskWeightStore::new();
    apply_weight_args(&store, weights);

    let summary = no_data_on_missing(summarize(&ctx.data, &summary_query, None))?;
    let risk = no_data_on_missing(build_risk_profile(
        &ctx.data,
        &summary_query.country,
        &summary_query.industry,
        summary_query.depth,
        &store,
    ))?;
    let options = FlowMapOptions { depth: map_query.depth, secondary: false, use_thickness: true };
    let flows = no_data_on_missing(build_flow_map(
        &ctx.data,
        &map_query.country,
        &map_query.industry,
        options,
    ))?;

    let bundle = ReportBundle {
        generated_at: chrono::Utc::now().to_rfc3339(),
        dataset: ctx.config.name.clone(),
        query: ReportQuery {
            country: summary_query.country.clone(),
            industry: summary_query.industry.clone(),
            summary_depth: summary_query.depth,
            depth: map_query.depth,
        },
        summary,
        risk,
        flows,
    };

    let layout = &ctx.layout;
    fs::create_dir_all(&layout.reports_dir).with_context(|| {
        format!("Failed to create reports dir: {}", layout.reports_dir.display())
    })?;
    let report_path = layout.report_path(&bundle.query.country, &bundle.query.industry);
    let body = serde_json::to_string_pretty(&bundle).context("Failed to serialize report")?;
    fs::write(&report_path, body)
        .with_context(|| format!("Failed to write report at {}", report_path.display()))?;
    info!(path = %report_path.display(), "Exported report");

    if json {
        return print_json(&bundle);
    }

    println!("Exported report:");
    println!("  Pair: {}_{}", bundle.query.country, bundle.query.industry);
    println!("  Generated at: {}", bundle.generated_at);
    println!("  Path: {}", report_path.display());
    Ok(())
}
