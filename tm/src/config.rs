//! todomvc configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the task list is persisted
    pub storage: StorageConfig,

    /// Terminal output options
    pub display: DisplayConfig,
}

/// Project-local config file, looked up in the current directory
const LOCAL_CONFIG: &str = ".todomvc.yml";

impl Config {
    /// Load configuration
    ///
    /// An explicit path must load. Otherwise the first readable file among
    /// [`Config::candidate_paths`] wins, and broken ones are skipped with a
    /// warning.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }
        Ok(Self::load_first(&Self::candidate_paths()))
    }

    /// Config files tried in order when no path is given
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        paths.extend(dirs::config_dir().map(|dir| dir.join("todomvc").join("todomvc.yml")));
        paths
    }

    fn load_first(candidates: &[PathBuf]) -> Self {
        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable config"),
            }
        }
        info!(tried = candidates.len(), "No config file found, using defaults");
        Self::default()
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        info!(path = %path.as_ref().display(), "Loaded config");
        Ok(config)
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the persisted blob
    pub dir: PathBuf,

    /// Blob key the state is stored under
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("todomvc"),
            key: todostore::STORAGE_KEY.to_string(),
        }
    }
}

/// Terminal output options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Colorize output
    pub color: bool,

    /// Show short task IDs in listings
    #[serde(rename = "show-ids")]
    pub show_ids: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_ids: true,
        }
    }
}
