use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::storage::OutputFormat;

/// Configuration for a compatibility run.
///
/// Every setting has a default; a file only needs its `_version` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Where the component catalogs are read from.
    pub catalog: CatalogConfig,

    /// Where and how accepted combinations are written.
    pub output: OutputConfig,
}

/// Catalog file locations and loading policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// CSV file of processors.
    pub cpus: PathBuf,
    /// CSV file of memory modules.
    pub ram: PathBuf,
    /// CSV file of motherboards.
    pub motherboards: PathBuf,
    /// CSV file of drives.
    pub ssds: PathBuf,

    /// Whether an unreadable catalog file aborts the run.
    ///
    /// When `false` (default): the file is reported and its category is
    /// treated as empty, which yields no combinations.
    pub strict: bool,

    /// The column holding each component's unique name.
    pub keys: KeyColumns,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cpus: PathBuf::from("data/cpu_complete.csv"),
            ram: PathBuf::from("data/ram_complete.csv"),
            motherboards: PathBuf::from("data/motherboard_complete.csv"),
            ssds: PathBuf::from("data/ssd_complete.csv"),
            strict: false,
            keys: KeyColumns::default(),
        }
    }
}

/// Name columns for each category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyColumns {
    /// Processor name column.
    pub cpu: String,
    /// Memory module name column.
    pub ram: String,
    /// Motherboard name column.
    pub motherboard: String,
    /// Drive name column.
    pub ssd: String,
}

impl Default for KeyColumns {
    fn default() -> Self {
        Self {
            cpu: "cpuName".to_string(),
            ram: "model".to_string(),
            motherboard: "Name".to_string(),
            ssd: "Model".to_string(),
        }
    }
}

/// Output destination and enumeration limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file. Standard output when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Encoding of accepted combinations.
    pub format: OutputFormat,

    /// Stop after this many accepted combinations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Number of worker threads. `1` runs sequentially; unset uses one per
    /// core.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Config {
    /// The default configuration file name.
    pub const FILE_NAME: &'static str = "compat.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Loads the configuration if the file exists, otherwise returns the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }
}

/// Errors reading or writing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] std::io::Error),
    /// The file is not valid configuration TOML.
    #[error("Failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),
    /// The configuration could not be encoded.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),
    /// The file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] std::io::Error),
}

/// On-disk layouts of [`Config`], tagged by `_version`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        catalog: CatalogConfig,

        #[serde(default)]
        output: OutputConfig,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { catalog, output } => Self { catalog, output },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            catalog: config.catalog,
            output: config.output,
        }
    }
}
