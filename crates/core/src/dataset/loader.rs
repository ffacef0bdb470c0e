//! Reading the three source tables (flows, industries, countries).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dataset::FlowData;
use crate::model::{CountryInfo, CountryRegistry, IndustryInfo, IndustryRegistry};
use crate::table::FlowTable;

/// Dense flow matrix as exported from an ICIO table: row labels, column
/// labels and row-major values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFlowTable {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Row of the industry metadata table (`Code, Industry`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIndustry {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Industry")]
    pub industry: String,
}

/// Row of the country code table (`Code, countries`, plus display attributes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCountry {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "countries")]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, alias = "latitude")]
    pub lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    pub lon: Option<f64>,
}

impl From<RawIndustry> for IndustryInfo {
    fn from(raw: RawIndustry) -> Self {
        IndustryInfo::new(raw.code, raw.industry)
    }
}

impl From<RawCountry> for CountryInfo {
    fn from(raw: RawCountry) -> Self {
        CountryInfo {
            code: raw.code,
            name: raw.name,
            color: raw.color,
            latitude: raw.lat,
            longitude: raw.lon,
        }
    }
}

/// Source of the three tables the analysis needs.
pub trait DataSource {
    fn load_flows(&self) -> Result<RawFlowTable>;
    fn load_industries(&self) -> Result<Vec<RawIndustry>>;
    fn load_countries(&self) -> Result<Vec<RawCountry>>;
}

/// Reads each table from a CSV, JSON or YAML document, chosen by file
/// extension.
#[derive(Debug, Clone)]
pub struct FileDataSource {
    pub flows_path: PathBuf,
    pub industries_path: PathBuf,
    pub countries_path: PathBuf,
}

impl FileDataSource {
    pub fn new(
        flows_path: impl Into<PathBuf>,
        industries_path: impl Into<PathBuf>,
        countries_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            flows_path: flows_path.into(),
            industries_path: industries_path.into(),
            countries_path: countries_path.into(),
        }
    }
}

impl DataSource for FileDataSource {
    fn load_flows(&self) -> Result<RawFlowTable> {
        read_flow_table(&self.flows_path)
    }

    fn load_industries(&self) -> Result<Vec<RawIndustry>> {
        read_records(&self.industries_path)
    }

    fn load_countries(&self) -> Result<Vec<RawCountry>> {
        read_records(&self.countries_path)
    }
}

/// On-disk encoding of a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Csv,
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from the extension (`csv`, `json`, `yaml`, `yml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext =
            path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(anyhow!(
                "Unsupported data file extension '{}' for {} (expected csv, json, yaml or yml)",
                other,
                path.display()
            )),
        }
    }
}

/// Deserialize a whole `.json`, `.yaml` or `.yml` document.
///
/// CSV files have no document form; use [`read_flow_table`] or
/// [`read_records`] for those.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = DocumentFormat::from_path(path)?;
    if format == DocumentFormat::Csv {
        return Err(anyhow!(
            "{} is a CSV file; it can only be read as a flow table or a record list",
            path.display()
        ));
    }
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;
    match format {
        DocumentFormat::Yaml => serde_yaml::from_str(&body)
            .with_context(|| format!("Failed to parse YAML in {}", path.display())),
        _ => serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse JSON in {}", path.display())),
    }
}

/// Read a list of records: one CSV row per record (header names map to
/// fields), or a JSON/YAML sequence.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if DocumentFormat::from_path(path)? != DocumentFormat::Csv {
        return read_document(path);
    }
    let mut reader = csv_reader(path)?;
    reader
        .deserialize()
        .enumerate()
        .map(|(i, record)| {
            record.with_context(|| {
                format!("Failed to parse CSV row {} in {}", i + 1, path.display())
            })
        })
        .collect()
}

/// Read the dense flow matrix.
///
/// In CSV form the first column holds the row labels (its header, `V1` in
/// ICIO exports, is ignored) and the remaining headers are the column
/// labels. Empty cells read as `0.0`.
pub fn read_flow_table(path: &Path) -> Result<RawFlowTable> {
    if DocumentFormat::from_path(path)? != DocumentFormat::Csv {
        return read_document(path);
    }
    let mut reader = csv_reader(path)?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header of {}", path.display()))?;
    let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut rows = Vec::new();
    let mut values = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read CSV row {} in {}", i + 1, path.display()))?;
        let mut fields = record.iter();
        let Some(label) = fields.next() else {
            continue;
        };
        let row = fields.map(parse_cell).collect::<Result<Vec<f64>>>().with_context(|| {
            format!("Invalid value in row '{}' of {}", label, path.display())
        })?;
        rows.push(label.to_string());
        values.push(row);
    }
    Ok(RawFlowTable { rows, columns, values })
}

fn csv_reader(path: &Path) -> Result<csv::Reader<fs::File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))
}

fn parse_cell(raw: &str) -> Result<f64> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>().with_context(|| format!("'{raw}' is not a number"))
}

/// Load all three tables and build the indexed flow table.
///
/// Flow rows/columns whose country is not in the country table are dropped.
pub fn load_flow_data(source: &dyn DataSource) -> Result<FlowData> {
    let countries =
        CountryRegistry::new(source.load_countries()?.into_iter().map(CountryInfo::from));
    let industries =
        IndustryRegistry::new(source.load_industries()?.into_iter().map(IndustryInfo::from));
    let raw = source.load_flows()?;
    let table = FlowTable::from_dense(&raw.rows, &raw.columns, &raw.values, &countries)
        .context("Failed to build flow table")?;

    info!(
        countries = countries.len(),
        industries = industries.len(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Loaded IO dataset"
    );
    Ok(FlowData { table, countries, industries })
}
