use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::encoding::strip_bom;

// =============================================================================
// Index constants
// =============================================================================

/// Default package index (PyPI Simple API)
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/simple";

/// Timeout for a single artifact download in milliseconds (10 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 10_000;

/// Memoized project list entries
pub const PROJECT_LIST_MEMO_CAPACITY: usize = 2;

/// Memoized per-project file listings
pub const PROJECT_FILES_MEMO_CAPACITY: usize = 20;

// =============================================================================
// Batch constants
// =============================================================================

/// Extraction cache written by the batch
pub const DEFAULT_CACHE_FILE: &str = "setupinfo.json";

/// Saved copy of the index's project list
pub const DEFAULT_MIRROR_FILE: &str = "projects.json";

/// New records between cache snapshots
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 1000;

/// Dependency name prefix searched by `analyze`
pub const DEFAULT_DEPENDENCY_PREFIX: &str = "azure-";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// depper configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub index: IndexConfig,
    pub mirror: MirrorConfig,
    pub scan: ScanConfig,
}

impl Config {
    /// Load the config file at `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(strip_bom(&content)).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Package index configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexConfig {
    /// Simple API base URL
    pub url: String,
    /// Artifact download timeout in milliseconds
    pub timeout_ms: u64,
    /// Project-list mirror file
    pub mirror_file: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INDEX_URL.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
            mirror_file: PathBuf::from(DEFAULT_MIRROR_FILE),
        }
    }
}

/// Batch cache configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MirrorConfig {
    pub cache_file: PathBuf,
    pub checkpoint_interval: usize,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
        }
    }
}

/// Dependency scan configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    pub prefix: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_DEPENDENCY_PREFIX.to_string(),
        }
    }
}

/// Returns the path to the data directory for depper.
/// Uses $XDG_DATA_HOME/depper if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/depper,
/// or ./depper if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("depper.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("depper")
}
