use std::fs;
use std::path::Path;

use flowrisk::{canonicalize_or_current, default_log_filter, infer_dataset_name};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    let result = canonicalize_or_current(".").expect("canonicalize").canonicalize().expect("canon");
    let expected = tmp.path().canonicalize().expect("canon tmp");
    std::env::set_current_dir(original).expect("restore cwd");

    assert_eq!(result, expected);
}

#[test]
fn canonicalize_or_current_resolves_existing_absolute_path() {
    let tmp = tempdir().expect("tempdir");
    let subdir = tmp.path().join("nested");
    fs::create_dir_all(&subdir).expect("create nested");

    let result = canonicalize_or_current(subdir.to_str().expect("utf8")).expect("canonicalize");
    assert_eq!(result, subdir.canonicalize().expect("canonicalize subdir"));
}

#[test]
fn canonicalize_or_current_keeps_missing_paths() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("not-yet");
    let result = canonicalize_or_current(missing.to_str().expect("utf8")).expect("resolve");
    assert!(result.ends_with("not-yet"));
    assert!(result.is_absolute());
}

#[test]
fn infer_dataset_name_uses_last_path_component() {
    assert_eq!(infer_dataset_name(Path::new("/data/icio-2021")), "icio-2021");
    assert_eq!(infer_dataset_name(Path::new("/tmp/dataset-root")), "dataset-root");
}

#[test]
fn infer_dataset_name_falls_back_when_missing() {
    assert_eq!(infer_dataset_name(Path::new("/")), "unnamed-dataset");
}

#[test]
fn verbose_raises_default_log_level() {
    assert_eq!(default_log_filter(false), "warn");
    assert_eq!(default_log_filter(true), "debug");
}
