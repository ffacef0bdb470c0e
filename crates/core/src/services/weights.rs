use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Weight used for countries without an explicit entry.
pub const DEFAULT_COUNTRY_WEIGHT: f64 = 1.0;

/// Weight the selected importer gets unless explicitly overridden.
pub const IMPORTER_WEIGHT: f64 = 0.0;

/// Country code -> risk weight, plus the importer the weights were built for.
///
/// Lookup order: explicit entry, then `0.0` for the importer, then `1.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskWeightMap {
    weights: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    importer: Option<String>,
}

impl RiskWeightMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the selected importer, whose domestic inputs default to weight 0.
    pub fn with_importer(mut self, importer: impl Into<String>) -> Self {
        self.importer = Some(importer.into());
        self
    }

    pub fn with_weight(mut self, country: impl Into<String>, weight: f64) -> Self {
        self.insert(country, weight);
        self
    }

    pub fn insert(&mut self, country: impl Into<String>, weight: f64) {
        self.weights.insert(country.into(), weight);
    }

    pub fn importer(&self) -> Option<&str> {
        self.importer.as_deref()
    }

    /// Explicit entry for `country`, if any.
    pub fn get(&self, country: &str) -> Option<f64> {
        self.weights.get(country).copied()
    }

    /// Effective weight for `country`.
    pub fn weight_for(&self, country: &str) -> f64 {
        match self.weights.get(country) {
            Some(&w) => w,
            None if self.importer.as_deref() == Some(country) => IMPORTER_WEIGHT,
            None => DEFAULT_COUNTRY_WEIGHT,
        }
    }

    /// Explicit entries, sorted by country code.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Per-session store of user weight overrides.
///
/// The store is owned by whatever session or request context the frontend
/// uses and passed explicitly to the risk pipeline. Each update replaces or
/// inserts a single key under the write lock, so concurrent readers see
/// either the old or the new value for that key.
#[derive(Debug, Default)]
pub struct RiskWeightStore {
    overrides: RwLock<BTreeMap<String, f64>>,
}

impl RiskWeightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the explicit overrides.
    pub fn get_weights(&self) -> RiskWeightMap {
        let guard = self.overrides.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        RiskWeightMap { weights: guard.clone(), importer: None }
    }

    /// Set the weight for one country.
    ///
    /// Blank country codes and weights that are not finite and non-negative
    /// are ignored. Returns whether the update was applied.
    pub fn apply_update(&self, country_code: &str, weight: f64) -> bool {
        let code = country_code.trim();
        if code.is_empty() || !weight.is_finite() || weight < 0.0 {
            debug!(country = country_code, weight, "Ignoring invalid risk weight update");
            return false;
        }
        let mut guard = self.overrides.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.insert(code.to_string(), weight);
        debug!(country = code, weight, "Applied risk weight update");
        true
    }

    /// Apply an update from raw, possibly incomplete user input.
    ///
    /// Missing fields and non-numeric weights are ignored.
    pub fn apply_raw_update(&self, country_code: Option<&str>, weight: Option<&str>) -> bool {
        let (Some(code), Some(raw)) = (country_code, weight) else {
            debug!("Ignoring incomplete risk weight update");
            return false;
        };
        match raw.trim().parse::<f64>() {
            Ok(value) => self.apply_update(code, value),
            Err(_) => {
                debug!(country = code, raw, "Ignoring non-numeric risk weight");
                false
            }
        }
    }

    /// Drop every override.
    pub fn clear(&self) {
        self.overrides.write().unwrap_or_else(|poisoned| poisoned.into_inner()).clear();
    }

    /// Weights for one query: every observed country at `1.0`, the importer at
    /// `0.0`, then the stored overrides on top.
    pub fn effective_weights<'a>(
        &self,
        observed_countries: impl IntoIterator<Item = &'a str>,
        importer: &str,
    ) -> RiskWeightMap {
        let mut map = RiskWeightMap::new().with_importer(importer);
        for country in observed_countries {
            map.insert(country, DEFAULT_COUNTRY_WEIGHT);
        }
        map.insert(importer, IMPORTER_WEIGHT);
        let overrides = self.get_weights();
        for (country, weight) in overrides.iter() {
            map.insert(country, weight);
        }
        map
    }
}
