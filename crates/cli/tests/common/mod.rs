#![allow(dead_code)]

use std::fs;
use std::path::Path;

use flowrisk_core::dataset::{DatasetConfig, DatasetLayout};

/// Dense flow matrix with one aggregate row (`VA_TOTAL`) that loading drops.
///
/// Inflows into NZL_A01_02: CHN_A01_02=500, AUS_A01_02=300, NZL_A01_02=200,
/// NZL_C10T12=80, AUS_C10T12=50.
pub const FLOWS_JSON: &str = r#"{
  "rows": ["NZL_A01_02", "NZL_C10T12", "CHN_A01_02", "CHN_C10T12", "AUS_A01_02", "AUS_C10T12", "VA_TOTAL"],
  "columns": ["NZL_A01_02", "CHN_A01_02", "AUS_A01_02", "NZL_C10T12", "AUS_C10T12"],
  "values": [
    [200.0,  0.0, 25.0, 15.0, 0.0],
    [ 80.0,  0.0,  0.0,  0.0, 0.0],
    [500.0,  0.0,  0.0,  0.0, 0.0],
    [  0.0, 90.0,  0.0,  0.0, 0.0],
    [300.0,  0.0,  0.0,  0.0, 0.0],
    [ 50.0,  0.0,  0.0,  0.0, 0.0],
    [999.0, 999.0, 999.0, 999.0, 999.0]
  ]
}"#;

pub const INDUSTRIES_JSON: &str = r#"[
  {"Code": "A01_02", "Industry": "Agriculture"},
  {"Code": "C10T12", "Industry": "Food products"}
]"#;

pub const COUNTRIES_JSON: &str = r##"[
  {"Code": "NZL", "countries": "New Zealand", "color": "#000000", "lat": -41.0, "lon": 174.0},
  {"Code": "CHN", "countries": "China", "color": "#de2910", "lat": 35.0, "lon": 103.0},
  {"Code": "AUS", "countries": "Australia", "lat": -25.0, "lon": 133.0}
]"##;

/// Write config and the three source documents under `root`.
pub fn write_sample_dataset(root: &Path) -> DatasetLayout {
    let layout = DatasetLayout::new(root);
    fs::create_dir_all(&layout.meta_dir).expect("meta dir");
    fs::create_dir_all(&layout.data_dir).expect("data dir");
    fs::write(&layout.flows_path, FLOWS_JSON).expect("flows");
    fs::write(&layout.industries_path, INDUSTRIES_JSON).expect("industries");
    fs::write(&layout.countries_path, COUNTRIES_JSON).expect("countries");

    let config = DatasetConfig::new("sample", &layout);
    fs::write(&layout.config_path, serde_json::to_string_pretty(&config).expect("config json"))
        .expect("config");
    layout
}
