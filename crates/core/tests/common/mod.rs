#![allow(dead_code)]

use flowrisk_core::dataset::FlowData;
use flowrisk_core::model::{CountryInfo, CountryRegistry, IndustryInfo, IndustryRegistry};
use flowrisk_core::table::{FlowTable, FlowTableBuilder};

pub fn countries() -> CountryRegistry {
    CountryRegistry::new(vec![
        CountryInfo::new("NZL", "New Zealand").with_color("#000000").with_coordinates(-41.0, 174.0),
        CountryInfo::new("CHN", "China").with_color("#de2910").with_coordinates(35.0, 103.0),
        CountryInfo::new("AUS", "Australia").with_color("#00843d").with_coordinates(-25.0, 133.0),
        CountryInfo::new("USA", "United States").with_coordinates(38.0, -97.0),
        // No coordinates on purpose: links from here are skipped on maps.
        CountryInfo::new("ROW", "Rest of the world"),
    ])
}

pub fn industries() -> IndustryRegistry {
    IndustryRegistry::new(vec![
        IndustryInfo::new("A01_02", "Agriculture"),
        IndustryInfo::new("C10T12", "Food products"),
        IndustryInfo::new("B05_06", "Mining"),
    ])
}

/// Inflows into NZL_A01_02:
/// CHN_A01_02=500, AUS_A01_02=300, NZL_A01_02=200,
/// USA_C10T12=150, NZL_C10T12=80, AUS_C10T12=50, ROW_B05_06=20.
pub fn sample_table() -> FlowTable {
    FlowTableBuilder::new()
        .flow("CHN_A01_02", "NZL_A01_02", 500.0)
        .and_then(|b| b.flow("AUS_A01_02", "NZL_A01_02", 300.0))
        .and_then(|b| b.flow("NZL_A01_02", "NZL_A01_02", 200.0))
        .and_then(|b| b.flow("USA_C10T12", "NZL_A01_02", 150.0))
        .and_then(|b| b.flow("NZL_C10T12", "NZL_A01_02", 80.0))
        .and_then(|b| b.flow("AUS_C10T12", "NZL_A01_02", 50.0))
        .and_then(|b| b.flow("ROW_B05_06", "NZL_A01_02", 20.0))
        // Suppliers' own inputs, for secondary expansion.
        .and_then(|b| b.flow("USA_A01_02", "CHN_A01_02", 40.0))
        .and_then(|b| b.flow("CHN_C10T12", "CHN_A01_02", 90.0))
        .and_then(|b| b.flow("NZL_A01_02", "AUS_A01_02", 25.0))
        .and_then(|b| b.column("USA_C10T12"))
        .and_then(|b| b.column("AUS_C10T12"))
        .and_then(|b| b.column("ROW_B05_06"))
        .and_then(|b| b.column("NZL_C10T12"))
        // A column with no inflows at all.
        .and_then(|b| b.column("USA_B05_06"))
        .expect("sample table")
        .build()
}

pub fn sample_data() -> FlowData {
    FlowData { table: sample_table(), countries: countries(), industries: industries() }
}

pub fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}
