mod common;

use std::fs;

use flowrisk_core::dataset::DatasetLayout;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn run_json(args: &[&str], root: &std::path::Path) -> Value {
    let output = assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .args(args)
        .arg("--root")
        .arg(root)
        .arg("--json")
        .output()
        .expect("run flowrisk");
    assert!(
        output.status.success(),
        "flowrisk {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

/// Running the CLI with no subcommand prints usage and fails.
#[test]
fn missing_subcommand_fails_with_usage() {
    assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

/// init-dataset without an explicit --root should use the current directory.
#[test]
fn init_dataset_uses_default_root_when_not_provided() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();

    assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .current_dir(root)
        .arg("init-dataset")
        .arg("--name")
        .arg("TestDataset")
        .assert()
        .success()
        .stdout(predicate::str::contains("TestDataset"));

    let layout = DatasetLayout::new(root);
    assert!(layout.config_path.exists(), "config should exist at {}", layout.config_path.display());
    assert!(layout.data_dir.is_dir());
    assert!(layout.reports_dir.is_dir());
}

/// dataset-info works before any data is present and reports missing files.
#[test]
fn dataset_info_reports_missing_sources() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();

    assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .arg("init-dataset")
        .arg("--root")
        .arg(root)
        .assert()
        .success();

    assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .arg("dataset-info")
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("MISSING"))
        .stdout(predicate::str::contains("source files missing"));
}

/// dataset-info should fail (non-zero exit) if no dataset config exists.
#[test]
fn dataset_info_fails_when_config_missing() {
    let dir = tempdir().expect("tempdir");

    assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .arg("dataset-info")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read dataset config"));
}

#[test]
fn dataset_info_counts_loaded_table() {
    let dir = tempdir().expect("tempdir");
    common::write_sample_dataset(dir.path());

    let info = run_json(&["dataset-info"], dir.path());
    assert_eq!(info["name"], "sample");
    // The aggregate VA_TOTAL row is dropped on load.
    assert_eq!(info["counts"]["rows"], 6);
    assert_eq!(info["counts"]["columns"], 5);
    assert_eq!(info["counts"]["countries"], 3);
}

#[test]
fn top_inputs_uses_configured_defaults() {
    let dir = tempdir().expect("tempdir");
    common::write_sample_dataset(dir.path());

    let selection = run_json(&["top-inputs"], dir.path());
    assert_eq!(selection["target"], "NZL_A01_02");
    let sources: Vec<&str> = selection["entries"]
        .as_array()
        .expect("entries")
        .iter()
        .map(|e| e["source"].as_str().expect("source"))
        .collect();
    assert_eq!(sources, vec!["CHN_A01_02", "AUS_A01_02", "AUS_C10T12"]);

    let selection = run_json(&["top-inputs", "--depth", "1", "--domestic-breakdown"], dir.path());
    let sources: Vec<&str> = selection["entries"]
        .as_array()
        .expect("entries")
        .iter()
        .map(|e| e["source"].as_str().expect("source"))
        .collect();
    assert_eq!(sources, vec!["CHN_A01_02", "NZL_A01_02"]);
}

#[test]
fn top_inputs_human_output_lists_ranked_suppliers() {
    let dir = tempdir().expect("tempdir");
    common::write_sample_dataset(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .arg("top-inputs")
        .arg("--root")
        .arg(dir.path())
        .arg("--depth")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. CHN_A01_02 (China) 500.00"))
        .stdout(predicate::str::contains("2. AUS_A01_02 (Australia) 300.00"));
}

#[test]
fn unknown_pair_reports_no_data_and_fails() {
    let dir = tempdir().expect("tempdir");
    common::write_sample_dataset(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .arg("top-inputs")
        .arg("--root")
        .arg(dir.path())
        .arg("--country")
        .arg("FRA")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data for this selection (FRA_A01_02)"));
}

#[test]
fn pair_without_inflows_is_not_an_error() {
    let dir = tempdir().expect("tempdir");
    common::write_sample_dataset(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .arg("top-inputs")
        .arg("--root")
        .arg(dir.path())
        .arg("--country")
        .arg("AUS")
        .arg("--industry")
        .arg("C10T12")
        .assert()
        .success()
        .stdout(predicate::str::contains("no positive inflows"));
}

#[test]
fn risk_applies_weight_overrides() {
    let dir = tempdir().expect("tempdir");
    common::write_sample_dataset(dir.path());

    let profile = run_json(&["risk"], dir.path());
    let agri = &profile["metrics"][0];
    assert_eq!(agri["industry"], "A01_02");
    assert!((agri["weighted_hhi"].as_f64().expect("weighted") - 0.53125).abs() < 1e-9);
    assert!((agri["hhi"].as_f64().expect("hhi") - 0.38).abs() < 1e-9);

    let profile = run_json(&["risk", "--weight", "CHN=0", "--weight", "AUS=abc"], dir.path());
    let weights = profile["weights"].as_array().expect("weights");
    let weight_of = |code: &str| {
        weights.iter().find(|w| w["country"] == code).and_then(|w| w["weight"].as_f64())
    };
    assert_eq!(weight_of("CHN"), Some(0.0));
    assert_eq!(weight_of("AUS"), Some(1.0));
    assert_eq!(weight_of("NZL"), Some(0.0));
    assert_eq!(profile["metrics"][0]["weighted_hhi"].as_f64(), Some(1.0));
}

#[test]
fn summary_defaults_to_first_input_industry() {
    let dir = tempdir().expect("tempdir");
    common::write_sample_dataset(dir.path());

    let summary = run_json(&["summary"], dir.path());
    assert_eq!(summary["input_industry"], "A01_02");
    assert_eq!(summary["total"].as_f64(), Some(1000.0));
    let shares: Vec<f64> = summary["breakdown"]["shares"]
        .as_array()
        .expect("shares")
        .iter()
        .map(|s| s["percentage"].as_f64().expect("pct"))
        .collect();
    assert_eq!(shares, vec![50.0, 30.0, 20.0]);

    let summary = run_json(&["summary", "--input-industry", "C10T12"], dir.path());
    assert_eq!(summary["input_industry_name"], "Food products");
    assert_eq!(summary["total"].as_f64(), Some(130.0));
}

#[test]
fn input_industries_lists_codes_with_labels() {
    let dir = tempdir().expect("tempdir");
    common::write_sample_dataset(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .arg("input-industries")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("- A01_02 - Agriculture"))
        .stdout(predicate::str::contains("- C10T12 - Food products"));
}

#[test]
fn flows_expand_secondary_routes() {
    let dir = tempdir().expect("tempdir");
    common::write_sample_dataset(dir.path());

    let map = run_json(&["flows", "--thickness"], dir.path());
    assert_eq!(map["links"].as_array().map(Vec::len), Some(3));
    assert_eq!(map["links"][0]["thickness"].as_f64(), Some(10.0));
    assert!(map.get("secondary").is_none());

    let map = run_json(&["flows", "--secondary"], dir.path());
    assert_eq!(map["secondary"].as_array().map(Vec::len), Some(3));
    assert_eq!(map["links"].as_array().map(Vec::len), Some(4));
}

#[test]
fn heatmap_extracts_bilateral_submatrix() {
    let dir = tempdir().expect("tempdir");
    common::write_sample_dataset(dir.path());

    let heatmap = run_json(&["heatmap", "--country", "AUS", "--reference", "NZL"], dir.path());
    assert_eq!(heatmap["row_labels"], serde_json::json!(["A01_02", "C10T12"]));
    assert_eq!(heatmap["column_labels"], serde_json::json!(["C10T12", "A01_02"]));
    assert_eq!(heatmap["values"], serde_json::json!([[0.0, 300.0], [0.0, 50.0]]));
    assert_eq!(heatmap["max"].as_f64(), Some(300.0));
}

#[test]
fn heatmap_human_output_names_scale_in_lowercase() {
    let dir = tempdir().expect("tempdir");
    common::write_sample_dataset(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .args(["heatmap", "--country", "AUS", "--reference", "NZL", "--log", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Heatmap from AUS (rows) to NZL (columns), log scale"))
        .stdout(predicate::str::contains("Log scale").not());
}

#[test]
fn export_report_writes_bundle() {
    let dir = tempdir().expect("tempdir");
    let layout = common::write_sample_dataset(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("flowrisk")
        .arg("export-report")
        .arg("--root")
        .arg(dir.path())
        .arg("--weight")
        .arg("CHN=2.5")
        .assert()
        .success()
        .stdout(predicate::str::contains("NZL_A01_02.json"));

    let path = layout.report_path("NZL", "A01_02");
    let body = fs::read_to_string(&path).expect("report written");
    let report: Value = serde_json::from_str(&body).expect("report json");
    assert_eq!(report["dataset"], "sample");
    assert!(report["generated_at"].as_str().is_some_and(|s| !s.is_empty()));
    assert_eq!(report["query"]["summary_depth"], 50);
    assert_eq!(report["summary"]["input_industry"], "A01_02");
    assert_eq!(report["flows"]["target"], "NZL_A01_02");
    let chn = report["risk"]["weights"]
        .as_array()
        .expect("weights")
        .iter()
        .find(|w| w["country"] == "CHN")
        .and_then(|w| w["weight"].as_f64());
    assert_eq!(chn, Some(2.5));
}
