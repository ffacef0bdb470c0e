//! Concentration-risk scoring over a supplier selection.
//!
//! Entries are grouped by source industry and each group is scored on its own:
//! HHI and its inverse, Shannon entropy (raw and normalized), the Gini
//! coefficient of the shares and, when weights are supplied, a weighted HHI.
//! Degenerate groups never divide by zero; they resolve to `0.0`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::CompositeKey;
use crate::services::selection::SupplierSelection;
use crate::services::weights::RiskWeightMap;

/// Concentration metrics for one source industry of a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryRiskMetrics {
    pub industry: String,
    pub total_inputs: f64,
    pub num_sources: usize,
    pub hhi: f64,
    pub inverse_hhi: f64,
    pub entropy: f64,
    pub entropy_norm: f64,
    pub gini: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_hhi: Option<f64>,
}

/// Score every industry of `selection`, including the weighted HHI.
///
/// Output is ordered by industry code.
pub fn score(selection: &SupplierSelection, weights: &RiskWeightMap) -> Vec<IndustryRiskMetrics> {
    score_groups(selection, Some(weights))
}

/// Score every industry of `selection` without weights.
pub fn score_unweighted(selection: &SupplierSelection) -> Vec<IndustryRiskMetrics> {
    score_groups(selection, None)
}

fn score_groups(
    selection: &SupplierSelection,
    weights: Option<&RiskWeightMap>,
) -> Vec<IndustryRiskMetrics> {
    let mut groups: BTreeMap<&str, Vec<(&CompositeKey, f64)>> = BTreeMap::new();
    for entry in selection.iter() {
        let members = groups.entry(entry.source.industry.as_str()).or_default();
        members.push((&entry.source, entry.value));
    }

    let metrics: Vec<IndustryRiskMetrics> = groups
        .into_iter()
        .filter_map(|(industry, members)| score_group(industry, &members, weights))
        .collect();
    debug!(
        pair = %selection.target,
        industries = metrics.len(),
        weighted = weights.is_some(),
        "Scored supplier concentration"
    );
    metrics
}

fn score_group(
    industry: &str,
    members: &[(&CompositeKey, f64)],
    weights: Option<&RiskWeightMap>,
) -> Option<IndustryRiskMetrics> {
    let total: f64 = members.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return None;
    }
    let shares: Vec<f64> = members.iter().map(|(_, v)| v / total).collect();

    let hhi = herfindahl(&shares);
    let entropy = shannon_entropy(&shares);
    let entropy_norm =
        if shares.len() > 1 { entropy / (shares.len() as f64).ln() } else { 0.0 };

    let weighted_hhi = weights.map(|w| {
        let weighted: Vec<f64> = members
            .iter()
            .zip(&shares)
            .map(|((key, _), share)| share * w.weight_for(&key.country))
            .collect();
        match normalize(&weighted) {
            Some(normalized) => herfindahl(&normalized),
            None => 0.0,
        }
    });

    Some(IndustryRiskMetrics {
        industry: industry.to_string(),
        total_inputs: total,
        num_sources: members.len(),
        hhi,
        inverse_hhi: if hhi > 0.0 { 1.0 / hhi } else { 0.0 },
        entropy,
        entropy_norm,
        gini: gini(&shares),
        weighted_hhi,
    })
}

/// Sum of squared shares.
pub fn herfindahl(shares: &[f64]) -> f64 {
    shares.iter().map(|s| s * s).sum()
}

/// `-sum(p * ln p)`, skipping zero shares.
pub fn shannon_entropy(shares: &[f64]) -> f64 {
    -shares.iter().filter(|&&p| p > 0.0).map(|&p| p * p.ln()).sum::<f64>()
}

/// Gini coefficient via cumulative sums of the ascending values:
/// `(n + 1 - 2 * sum(C) / C[n]) / n`. Empty or zero-sum input gives `0.0`.
pub fn gini(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;

    let mut running = 0.0_f64;
    let mut cumulative_sum = 0.0_f64;
    for &v in &sorted {
        running += v;
        cumulative_sum += running;
    }
    if sorted.is_empty() || running <= 0.0 {
        return 0.0;
    }
    (n + 1.0 - 2.0 * cumulative_sum / running) / n
}

/// Rescale so the values sum to one; `None` when the sum is not positive.
fn normalize(values: &[f64]) -> Option<Vec<f64>> {
    let sum: f64 = values.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        Some(values.iter().map(|v| v / sum).collect())
    } else {
        None
    }
}
