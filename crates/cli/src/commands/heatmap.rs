use anyhow::Result;
use flowrisk_core::services::heatmap::{bilateral_heatmap, HeatmapScale};

use crate::commands::{load_context, no_data_on_missing, print_json};

/// Industry-by-industry flows from `country` into `reference`.
pub fn heatmap_command(
    root: &str,
    country: Option<&str>,
    reference: &str,
    log: bool,
    json: bool,
) -> Result<()> {
    let ctx = load_context(root)?;
    let country = country.unwrap_or(&ctx.config.defaults.importer);
    let scale = if log { HeatmapScale::Log } else { HeatmapScale::Linear };
    let heatmap = no_data_on_missing(bilateral_heatmap(
        &ctx.data.table,
        &ctx.data.industries,
        country,
        reference,
        scale,
    ))?;

    if json {
        return print_json(&heatmap);
    }

    println!(
        "Heatmap from {} (rows) to {} (columns), {} scale, range [{:.4}, {:.4}]",
        heatmap.from_country, heatmap.to_country, heatmap.scale, heatmap.min, heatmap.max
    );
    println!("{:>10} {}", "", heatmap.column_labels.join(" "));
    for (label, row) in heatmap.row_labels.iter().zip(&heatmap.values) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.4}")).collect();
        println!("{:>10} {}", label, cells.join(" "));
    }
    Ok(())
}
