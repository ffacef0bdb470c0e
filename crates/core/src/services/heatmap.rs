use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{CompositeKey, IndustryRegistry};
use crate::table::{FlowResult, FlowTable};

/// Value scaling applied to heatmap cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatmapScale {
    #[default]
    Linear,
    /// `ln(1 + v)`.
    Log,
}

impl fmt::Display for HeatmapScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeatmapScale::Linear => write!(f, "linear"),
            HeatmapScale::Log => write!(f, "log"),
        }
    }
}

/// Industry-by-industry flows from one country into another.
///
/// `values[r][c]` is the flow from `from_country`'s `row_labels[r]` industry
/// into `to_country`'s `column_labels[c]` industry. Columns run in reverse
/// registry order so the same-industry diagonal reads top-left to
/// bottom-right when rendered with a reversed y axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BilateralHeatmap {
    pub from_country: String,
    pub to_country: String,
    pub scale: HeatmapScale,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
    pub min: f64,
    pub max: f64,
}

/// Extract the bilateral submatrix for every registry industry.
///
/// Fails with `NotFound` when a `from_country` row or `to_country` column is
/// missing from the table.
pub fn bilateral_heatmap(
    table: &FlowTable,
    industries: &IndustryRegistry,
    from_country: &str,
    to_country: &str,
    scale: HeatmapScale,
) -> FlowResult<BilateralHeatmap> {
    let row_labels: Vec<String> = industries.codes().map(str::to_string).collect();
    let column_labels: Vec<String> = row_labels.iter().rev().cloned().collect();

    let mut values = Vec::with_capacity(row_labels.len());
    for row_industry in &row_labels {
        let row_key = CompositeKey::new(from_country, row_industry.as_str());
        let mut row = Vec::with_capacity(column_labels.len());
        for col_industry in &column_labels {
            let col_key = CompositeKey::new(to_country, col_industry.as_str());
            let raw = table.value(&row_key, &col_key)?;
            row.push(match scale {
                HeatmapScale::Linear => raw,
                HeatmapScale::Log => raw.ln_1p(),
            });
        }
        values.push(row);
    }

    let (min, max) = values
        .iter()
        .flatten()
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })
        .unwrap_or((0.0, 0.0));

    Ok(BilateralHeatmap {
        from_country: from_country.to_string(),
        to_country: to_country.to_string(),
        scale,
        row_labels,
        column_labels,
        values,
        min,
        max,
    })
}
