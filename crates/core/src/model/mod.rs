//! Reference data model: composite country-industry keys and the two
//! code-to-name registries.
//!
//! Everything here is immutable once loaded and cheap to share between
//! requests.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between the country and industry halves of a composite key.
pub const KEY_SEPARATOR: char = '_';

/// A composite key could not be split into a country and an industry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed composite key '{0}': expected COUNTRY_INDUSTRY")]
pub struct KeyParseError(pub String);

/// Country-industry pair, written `"{COUNTRY}_{INDUSTRY}"` (e.g. `NZL_A01_02`).
///
/// The split happens at the first separator only, so industry codes may
/// themselves contain underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompositeKey {
    pub country: String,
    pub industry: String,
}

impl CompositeKey {
    pub fn new(country: impl Into<String>, industry: impl Into<String>) -> Self {
        Self { country: country.into(), industry: industry.into() }
    }

    /// Split a raw key at its first separator. Both halves must be non-empty.
    pub fn parse(raw: &str) -> Result<Self, KeyParseError> {
        match raw.split_once(KEY_SEPARATOR) {
            Some((country, industry)) if !country.is_empty() && !industry.is_empty() => {
                Ok(Self::new(country, industry))
            }
            _ => Err(KeyParseError(raw.to_string())),
        }
    }

    pub fn is_domestic_to(&self, country: &str) -> bool {
        self.country == country
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.country, KEY_SEPARATOR, self.industry)
    }
}

impl TryFrom<String> for CompositeKey {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CompositeKey> for String {
    fn from(key: CompositeKey) -> Self {
        key.to_string()
    }
}

/// Display attributes for one country of the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl CountryInfo {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { code: code.into(), name: name.into(), color: None, latitude: None, longitude: None }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// `(latitude, longitude)` when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Ordered registry of known countries.
///
/// Order is the order of the source table; lookups go through a code index.
#[derive(Debug, Clone, Default)]
pub struct CountryRegistry {
    entries: Vec<CountryInfo>,
    index: HashMap<String, usize>,
}

impl CountryRegistry {
    /// Build from entries; a repeated code keeps its first occurrence.
    pub fn new(entries: impl IntoIterator<Item = CountryInfo>) -> Self {
        let mut registry = Self::default();
        for info in entries {
            if registry.index.contains_key(&info.code) {
                continue;
            }
            registry.index.insert(info.code.clone(), registry.entries.len());
            registry.entries.push(info);
        }
        registry
    }

    pub fn get(&self, code: &str) -> Option<&CountryInfo> {
        self.index.get(code).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Display name for `code`, falling back to the code itself.
    pub fn name_or_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code).map(|c| c.name.as_str()).unwrap_or(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryInfo> {
        self.entries.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One industry of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryInfo {
    pub code: String,
    pub name: String,
}

impl IndustryInfo {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { code: code.into(), name: name.into() }
    }
}

/// Ordered registry of industry codes and their display names.
#[derive(Debug, Clone, Default)]
pub struct IndustryRegistry {
    entries: Vec<IndustryInfo>,
    index: HashMap<String, usize>,
}

impl IndustryRegistry {
    /// Build from entries; a repeated code keeps its first occurrence.
    pub fn new(entries: impl IntoIterator<Item = IndustryInfo>) -> Self {
        let mut registry = Self::default();
        for info in entries {
            if registry.index.contains_key(&info.code) {
                continue;
            }
            registry.index.insert(info.code.clone(), registry.entries.len());
            registry.entries.push(info);
        }
        registry
    }

    pub fn get(&self, code: &str) -> Option<&IndustryInfo> {
        self.index.get(code).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Display name for `code`, falling back to the code itself.
    pub fn name_or_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code).map(|i| i.name.as_str()).unwrap_or(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndustryInfo> {
        self.entries.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|i| i.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
