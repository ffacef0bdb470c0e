use std::sync::Arc;
use std::thread;

use flowrisk_core::services::weights::{RiskWeightMap, RiskWeightStore};

#[test]
fn store_starts_empty() {
    let store = RiskWeightStore::new();
    assert!(store.get_weights().is_empty());
}

#[test]
fn invalid_updates_leave_weights_unchanged() {
    let store = RiskWeightStore::new();
    assert!(store.apply_update("CHN", 0.5));
    let before = store.get_weights();

    assert!(!store.apply_update("AUS", -1.0));
    assert!(!store.apply_update("AUS", f64::NAN));
    assert!(!store.apply_update("AUS", f64::INFINITY));
    assert!(!store.apply_update("", 1.0));
    assert!(!store.apply_update("   ", 1.0));
    assert!(!store.apply_raw_update(Some("AUS"), Some("abc")));
    assert!(!store.apply_raw_update(Some("AUS"), None));
    assert!(!store.apply_raw_update(None, Some("2.0")));
    assert!(!store.apply_raw_update(Some("CHN"), Some("-0.1")));

    assert_eq!(store.get_weights(), before);
}

#[test]
fn updates_replace_single_keys() {
    let store = RiskWeightStore::new();
    assert!(store.apply_update("CHN", 0.5));
    assert!(store.apply_raw_update(Some("AUS"), Some(" 2.5 ")));
    assert!(store.apply_update("CHN", 0.0));

    let weights = store.get_weights();
    assert_eq!(weights.get("CHN"), Some(0.0));
    assert_eq!(weights.get("AUS"), Some(2.5));
    assert_eq!(weights.len(), 2);

    store.clear();
    assert!(store.get_weights().is_empty());
}

#[test]
fn effective_weights_merge_defaults_importer_and_overrides() {
    let store = RiskWeightStore::new();
    let weights = store.effective_weights(["CHN", "AUS", "NZL"], "NZL");
    assert_eq!(weights.get("CHN"), Some(1.0));
    assert_eq!(weights.get("AUS"), Some(1.0));
    assert_eq!(weights.get("NZL"), Some(0.0));
    assert_eq!(weights.importer(), Some("NZL"));

    store.apply_update("NZL", 0.75);
    store.apply_update("USA", 3.0);
    let weights = store.effective_weights(["CHN"], "NZL");
    assert_eq!(weights.get("NZL"), Some(0.75));
    assert_eq!(weights.get("USA"), Some(3.0));
    let codes: Vec<&str> = weights.iter().map(|(c, _)| c).collect();
    assert_eq!(codes, vec!["CHN", "NZL", "USA"]);
}

#[test]
fn weight_map_lookup_order() {
    let map = RiskWeightMap::new().with_importer("NZL").with_weight("CHN", 0.25);
    assert_eq!(map.weight_for("CHN"), 0.25);
    assert_eq!(map.weight_for("NZL"), 0.0);
    assert_eq!(map.weight_for("AUS"), 1.0);
    assert_eq!(map.with_weight("NZL", 2.0).weight_for("NZL"), 2.0);
}

#[test]
fn concurrent_updates_never_tear_values() {
    let store = Arc::new(RiskWeightStore::new());
    let writers: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for round in 0..200 {
                    let value = if round % 2 == 0 { 1.0 } else { 2.0 };
                    store.apply_update("SHARED", value);
                    store.apply_update(&format!("C{i}"), f64::from(round));
                }
            })
        })
        .collect();

    for _ in 0..200 {
        if let Some(w) = store.get_weights().get("SHARED") {
            assert!(w == 1.0 || w == 2.0, "torn weight {w}");
        }
    }
    for handle in writers {
        handle.join().expect("writer thread");
    }

    let weights = store.get_weights();
    assert_eq!(weights.len(), 9);
    for i in 0..8 {
        assert_eq!(weights.get(&format!("C{i}")), Some(199.0));
    }
}
