use anyhow::Result;
use flowrisk_core::dataset::FlowData;
use flowrisk_core::services::aggregate::input_industry_options;
use flowrisk_core::services::reports::{build_io_summary, IoSummary};
use flowrisk_core::services::selection::select_top_inputs;
use flowrisk_core::table::FlowResult;

use crate::commands::{format_value, load_context, no_data_on_missing, print_json, QueryTarget};

/// Input totals per industry plus the country split of one input industry.
///
/// Without `--input-industry` the first available input industry is used.
pub fn summary_command(
    root: &str,
    country: Option<&str>,
    industry: Option<&str>,
    input_industry: Option<&str>,
    depth: Option<usize>,
    json: bool,
) -> Result<()> {
    let ctx = load_context(root)?;
    let query = QueryTarget::resolve(&ctx.config.defaults, country, industry, depth, true);
    let summary = no_data_on_missing(summarize(&ctx.data, &query, input_industry))?;

    if json {
        return print_json(&summary);
    }
    match summary {
        Some(summary) => print_summary(&summary),
        None => println!(
            "No data for {}_{}: no inputs from the selected industry.",
            query.country, query.industry
        ),
    }
    Ok(())
}

/// Summary for `query`, defaulting the input industry to the first option.
pub(crate) fn summarize(
    data: &FlowData,
    query: &QueryTarget,
    input_industry: Option<&str>,
) -> FlowResult<Option<IoSummary>> {
    let input_industry = match input_industry {
        Some(code) => code.to_string(),
        None => {
            let selection =
                select_top_inputs(&data.table, &query.industry, query.depth, &query.country, true)?;
            match input_industry_options(&selection, &data.industries).into_iter().next() {
                Some(option) => option.code,
                None => return Ok(None),
            }
        }
    };
    build_io_summary(data, &query.country, &query.industry, &input_industry, query.depth)
}

fn print_summary(summary: &IoSummary) {
    println!(
        "Inputs into {} ({}) / {} ({})",
        summary.importer_name, summary.importer, summary.output_industry_name,
        summary.output_industry
    );
    println!();

    println!("Totals by input industry:");
    for total in &summary.industry_totals {
        println!("- {} ({}): {}", total.name, total.code, format_value(total.value));
    }
    println!();

    println!(
        "Country shares of {} ({}), total {:.1}:",
        summary.input_industry_name, summary.input_industry, summary.total
    );
    for share in &summary.breakdown.shares {
        println!(
            "- {} ({}): {} ({:.2}%)",
            share.name,
            share.country,
            format_value(share.value),
            share.percentage
        );
    }
}
