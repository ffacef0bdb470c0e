use anyhow::Result;
use flowrisk_core::services::reports::{build_risk_profile, RiskProfile};
use flowrisk_core::services::weights::RiskWeightStore;

use crate::commands::{apply_weight_args, load_context, no_data_on_missing, print_json, QueryTarget};

/// Score supplier concentration for one pair, with optional weight overrides.
pub fn risk_command(
    root: &str,
    country: Option<&str>,
    industry: Option<&str>,
    depth: Option<usize>,
    weights: &[String],
    json: bool,
) -> Result<()> {
    let ctx = load_context(root)?;
    let query = QueryTarget::resolve(&ctx.config.defaults, country, industry, depth, true);

    let store = RiskWeightStore::new();
    apply_weight_args(&store, weights);
    let profile = no_data_on_missing(build_risk_profile(
        &ctx.data,
        &query.country,
        &query.industry,
        query.depth,
        &store,
    ))?;

    if json {
        return print_json(&profile);
    }
    print_risk_profile(&profile);
    Ok(())
}

fn print_risk_profile(profile: &RiskProfile) {
    println!(
        "Supplier risk for {} ({}) / {} ({})",
        profile.importer_name, profile.importer, profile.industry_name, profile.industry
    );
    println!();

    println!("Weights:");
    if profile.weights.is_empty() {
        println!("(none)");
    }
    for row in &profile.weights {
        println!("- {} ({}): {}", row.country, row.name, row.weight);
    }
    println!();

    println!("Metrics by input industry:");
    if profile.metrics.is_empty() {
        println!("(no data: no positive inflows)");
        return;
    }
    for row in &profile.metrics {
        let m = &row.metrics;
        let weighted =
            m.weighted_hhi.map(|w| format!("{w:.4}")).unwrap_or_else(|| "-".to_string());
        println!(
            "- {} ({}): sources={} total={:.2} hhi={:.4} 1/hhi={:.2} entropy={:.4} \
             entropy_norm={:.4} gini={:.4} weighted_hhi={}",
            row.industry_name,
            m.industry,
            m.num_sources,
            m.total_inputs,
            m.hhi,
            m.inverse_hhi,
            m.entropy,
            m.entropy_norm,
            m.gini,
            weighted
        );
    }
}
