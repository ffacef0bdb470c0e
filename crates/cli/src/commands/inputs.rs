use anyhow::Result;
use flowrisk_core::model::CountryRegistry;
use flowrisk_core::services::aggregate::input_industry_options;
use flowrisk_core::services::selection::{
    select_secondary_inputs, select_top_inputs, SupplierSelection,
};
use serde::Serialize;

use crate::commands::{format_value, load_context, no_data_on_missing, print_json, QueryTarget};

/// Rank the largest foreign suppliers of one country-industry pair.
pub fn top_inputs_command(
    root: &str,
    country: Option<&str>,
    industry: Option<&str>,
    depth: Option<usize>,
    domestic_breakdown: bool,
    json: bool,
) -> Result<()> {
    let ctx = load_context(root)?;
    let query = QueryTarget::resolve(&ctx.config.defaults, country, industry, depth, false);
    let selection = no_data_on_missing(select_top_inputs(
        &ctx.data.table,
        &query.industry,
        query.depth,
        &query.country,
        domestic_breakdown,
    ))?;

    if json {
        return print_json(&selection);
    }
    print_selection(&selection, &ctx.data.countries);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SecondaryInputsSnapshot {
    pub primary: SupplierSelection,
    pub secondary: Vec<SupplierSelection>,
}

/// Rank the suppliers of a pair, then the suppliers of each of those.
pub fn secondary_inputs_command(
    root: &str,
    country: Option<&str>,
    industry: Option<&str>,
    depth: Option<usize>,
    json: bool,
) -> Result<()> {
    let ctx = load_context(root)?;
    let query = QueryTarget::resolve(&ctx.config.defaults, country, industry, depth, false);
    let table = &ctx.data.table;
    let primary = no_data_on_missing(select_top_inputs(
        table,
        &query.industry,
        query.depth,
        &query.country,
        false,
    ))?;
    let secondary = no_data_on_missing(select_secondary_inputs(table, &primary, query.depth))?;
    let snapshot = SecondaryInputsSnapshot { primary, secondary };

    if json {
        return print_json(&snapshot);
    }

    print_selection(&snapshot.primary, &ctx.data.countries);
    for selection in &snapshot.secondary {
        println!();
        print_selection(selection, &ctx.data.countries);
    }
    Ok(())
}

/// List the source industries present among a pair's suppliers.
///
/// The first entry is what `summary` picks when no input industry is given.
pub fn input_industries_command(
    root: &str,
    country: Option<&str>,
    industry: Option<&str>,
    depth: Option<usize>,
    json: bool,
) -> Result<()> {
    let ctx = load_context(root)?;
    let query = QueryTarget::resolve(&ctx.config.defaults, country, industry, depth, true);
    let selection = no_data_on_missing(select_top_inputs(
        &ctx.data.table,
        &query.industry,
        query.depth,
        &query.country,
        true,
    ))?;
    let options = input_industry_options(&selection, &ctx.data.industries);

    if json {
        return print_json(&options);
    }

    println!("Input industries for {} ({}):", selection.target, options.len());
    if options.is_empty() {
        println!("(none)");
        return Ok(());
    }
    for option in options {
        println!("- {} - {}", option.code, option.label);
    }
    Ok(())
}

fn print_selection(selection: &SupplierSelection, countries: &CountryRegistry) {
    println!("Top inputs into {} ({}):", selection.target, selection.len());
    if selection.is_empty() {
        println!("(no data: no positive inflows)");
        return;
    }
    for (rank, entry) in selection.iter().enumerate() {
        println!(
            "{:>3}. {} ({}) {}",
            rank + 1,
            entry.source,
            countries.name_or_code(&entry.source.country),
            format_value(entry.value)
        );
    }
}
