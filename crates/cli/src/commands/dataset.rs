use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flowrisk_core::dataset::{
    load_dataset_config, open_dataset, DatasetConfig, DatasetLayout, QueryDefaults,
};
use serde::Serialize;

use crate::commands::{print_dir_status, print_file_status, print_json};
use crate::{canonicalize_or_current, infer_dataset_name};

/// Create the dataset directories and write `.flowrisk/dataset.json`.
///
/// The three source documents are not created; drop them into `data/` (or
/// point the config at them) before running queries.
pub fn init_dataset_command(root: &str, name: Option<String>) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = DatasetLayout::new(&root_path);

    let dataset_name = name.unwrap_or_else(|| infer_dataset_name(&root_path));

    fs::create_dir_all(&layout.meta_dir)
        .with_context(|| format!("Failed to create meta dir: {}", layout.meta_dir.display()))?;
    fs::create_dir_all(&layout.data_dir)
        .with_context(|| format!("Failed to create data dir: {}", layout.data_dir.display()))?;
    fs::create_dir_all(&layout.reports_dir).with_context(|| {
        format!("Failed to create reports dir: {}", layout.reports_dir.display())
    })?;

    let config = DatasetConfig::new(&dataset_name, &layout);
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(&layout.config_path, json).with_context(|| {
        format!("Failed to write dataset config: {}", layout.config_path.display())
    })?;

    println!("Initialized flowrisk dataset:");
    println!("  Name: {}", dataset_name);
    println!("  Root: {}", layout.root.display());
    println!("  Config: {}", layout.config_path.display());
    println!("  Flows: {}", config.files.flows);
    println!("  Industries: {}", config.files.industries);
    println!("  Countries: {}", config.files.countries);
    println!("  Reports dir: {}", layout.reports_dir.display());

    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DatasetInfoSnapshot {
    pub name: String,
    pub description: Option<String>,
    pub root: String,
    pub config_file: String,
    pub config_version: String,
    pub files: Vec<DatasetFileStatus>,
    pub defaults: QueryDefaults,
    /// Present only when every source document exists and loads.
    pub counts: Option<DatasetCounts>,
}

#[derive(Debug, Serialize)]
pub struct DatasetFileStatus {
    pub role: String,
    pub path: String,
    pub exists: bool,
}

#[derive(Debug, Serialize)]
pub struct DatasetCounts {
    pub countries: usize,
    pub industries: usize,
    pub rows: usize,
    pub columns: usize,
    pub stored_cells: usize,
}

/// Show config, source file status and, when loadable, table sizes.
pub fn dataset_info_command(root: &str, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = DatasetLayout::new(&root_path);
    let config = load_dataset_config(&layout)?;

    let files: Vec<DatasetFileStatus> = [
        ("flows", &config.files.flows),
        ("industries", &config.files.industries),
        ("countries", &config.files.countries),
    ]
    .into_iter()
    .map(|(role, configured)| {
        let path = layout.resolve(configured);
        DatasetFileStatus {
            role: role.to_string(),
            exists: path.is_file(),
            path: path.display().to_string(),
        }
    })
    .collect();

    let counts = if files.iter().all(|f| f.exists) {
        let (_config, data) = open_dataset(&layout)?;
        Some(DatasetCounts {
            countries: data.countries.len(),
            industries: data.industries.len(),
            rows: data.table.row_count(),
            columns: data.table.column_count(),
            stored_cells: data.table.stored_cells(),
        })
    } else {
        None
    };

    let snapshot = DatasetInfoSnapshot {
        name: config.name.clone(),
        description: config.description.clone(),
        root: layout.root.display().to_string(),
        config_file: layout.config_path.display().to_string(),
        config_version: config.config_version.clone(),
        files,
        defaults: config.defaults.clone(),
        counts,
    };

    if json {
        return print_json(&snapshot);
    }

    println!("flowrisk Dataset Info");
    println!("=====================");
    println!("Name: {}", snapshot.name);
    if let Some(desc) = &snapshot.description {
        println!("Description: {}", desc);
    }
    println!("Root: {}", snapshot.root);
    println!("Config file: {}", snapshot.config_file);
    println!("Config version: {}", snapshot.config_version);
    println!(
        "Defaults: importer={} industry={} depth={} summary_depth={}",
        snapshot.defaults.importer,
        snapshot.defaults.industry,
        snapshot.defaults.depth,
        snapshot.defaults.summary_depth
    );
    println!();

    println!("Directories:");
    print_dir_status("Meta dir (.flowrisk)", &layout.meta_dir);
    print_dir_status("Reports dir", &layout.reports_dir);
    println!();

    println!("Source files:");
    for file in &snapshot.files {
        print_file_status(&file.role, Path::new(&file.path));
    }

    match &snapshot.counts {
        Some(counts) => {
            println!();
            println!("Loaded data:");
            println!("- Countries: {}", counts.countries);
            println!("- Industries: {}", counts.industries);
            println!("- Flow table: {} rows x {} columns", counts.rows, counts.columns);
            println!("- Non-zero cells: {}", counts.stored_cells);
        }
        None => {
            println!();
            println!("Loaded data: (source files missing)");
        }
    }

    Ok(())
}
