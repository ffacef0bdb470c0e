use anyhow::Result;
use flowrisk_core::services::reports::{build_flow_map, FlowMap, FlowMapOptions};

use crate::commands::{format_value, load_context, no_data_on_missing, print_json, QueryTarget};

/// Supplier flow links into one pair, ready for a map renderer.
pub fn flows_command(
    root: &str,
    country: Option<&str>,
    industry: Option<&str>,
    depth: Option<usize>,
    secondary: bool,
    thickness: bool,
    json: bool,
) -> Result<()> {
    let ctx = load_context(root)?;
    let query = QueryTarget::resolve(&ctx.config.defaults, country, industry, depth, false);
    let options = FlowMapOptions { depth: query.depth, secondary, use_thickness: thickness };
    let map = no_data_on_missing(build_flow_map(
        &ctx.data,
        &query.country,
        &query.industry,
        options,
    ))?;

    if json {
        return print_json(&map);
    }
    match map {
        Some(map) => print_flow_map(&map),
        None => println!(
            "No data for {}_{}: no foreign suppliers.",
            query.country, query.industry
        ),
    }
    Ok(())
}

fn print_flow_map(map: &FlowMap) {
    println!("Flows into {} ({}, {}):", map.target, map.target_name, map.industry_name);
    if map.target_location.is_none() {
        println!("(importer has no coordinates; no links drawn)");
    }
    println!("Links ({}):", map.links.len());
    for link in &map.links {
        println!(
            "- {} -> {} value={} thickness={:.2}",
            link.source,
            link.receiver,
            format_value(link.value),
            link.thickness
        );
    }
    if !map.secondary.is_empty() {
        println!("Secondary routes: {} supplier(s) expanded", map.secondary.len());
    }
    for metrics in &map.concentration {
        println!(
            "Concentration of {}: hhi={:.4} sources={}",
            metrics.industry, metrics.hhi, metrics.num_sources
        );
    }
}
