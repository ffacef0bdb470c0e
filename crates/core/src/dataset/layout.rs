use std::path::{Path, PathBuf};

/// Logical layout of a dataset directory on disk.
///
/// This is derived from a chosen root path. It does *not* perform any IO itself.
/// The CLI or other frontends are responsible for actually creating directories
/// and files based on this layout.
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    /// Root directory of the dataset.
    pub root: PathBuf,
    /// Directory for internal metadata (.flowrisk).
    pub meta_dir: PathBuf,
    /// Path to the dataset config file (JSON).
    pub config_path: PathBuf,
    /// Default directory for the three source tables (data).
    pub data_dir: PathBuf,
    /// Default path of the flow matrix document.
    pub flows_path: PathBuf,
    /// Default path of the industry metadata document.
    pub industries_path: PathBuf,
    /// Default path of the country code document.
    pub countries_path: PathBuf,
    /// Directory for exported report bundles (reports).
    pub reports_dir: PathBuf,
}

impl DatasetLayout {
    /// Compute the default layout for a dataset rooted at `root`.
    ///
    /// This does *not* touch the filesystem.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let meta_dir = root.join(".flowrisk");
        let config_path = meta_dir.join("dataset.json");
        let data_dir = root.join("data");
        let flows_path = data_dir.join("flows.json");
        let industries_path = data_dir.join("industries.json");
        let countries_path = data_dir.join("countries.json");
        let reports_dir = root.join("reports");

        Self {
            root,
            meta_dir,
            config_path,
            data_dir,
            flows_path,
            industries_path,
            countries_path,
            reports_dir,
        }
    }

    /// Path suitable for storing in `DatasetConfig`, relative to `root` when
    /// possible.
    pub fn relative_string(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_string_lossy().to_string(),
            Err(_) => path.to_string_lossy().to_string(),
        }
    }

    /// Resolve a configured path: absolute paths are kept, relative ones are
    /// joined onto `root`.
    pub fn resolve(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Output path of an exported report for one importer/industry pair.
    pub fn report_path(&self, country: &str, industry: &str) -> PathBuf {
        self.reports_dir.join(format!("{country}_{industry}.json"))
    }
}
