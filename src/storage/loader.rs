//! Loads component catalogs from CSV files.
//!
//! Each category is a CSV file with a header row. One column holds the
//! component's unique name; every other column becomes a free-text attribute.

use std::{
    io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};

use crate::domain::{Catalog, CatalogConfig, Category, Component, ComponentRecord};

/// Loads all four categories described by the configuration.
///
/// # Errors
///
/// In strict mode, the first category that fails to load is returned as an
/// error. Otherwise a failing category is logged and left empty, which means
/// the catalog yields no combinations.
#[instrument(level = "debug", skip(config))]
pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog, LoadError> {
    let keys = &config.keys;
    Ok(Catalog {
        cpus: load_or_empty(&config.cpus, &keys.cpu, config.strict)?,
        ram: load_or_empty(&config.ram, &keys.ram, config.strict)?,
        motherboards: load_or_empty(&config.motherboards, &keys.motherboard, config.strict)?,
        ssds: load_or_empty(&config.ssds, &keys.ssd, config.strict)?,
    })
}

fn load_or_empty<T: Component>(
    path: &Path,
    key_column: &str,
    strict: bool,
) -> Result<Category<T>, LoadError> {
    match load_category(path, key_column) {
        Ok(category) => Ok(category),
        Err(e) if !strict => {
            warn!("{e}; treating the {} catalog as empty", T::KIND);
            Ok(Category::new())
        }
        Err(e) => Err(e),
    }
}

/// Loads one category from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, its header cannot be read,
/// or the header has no `key_column`.
pub fn load_category<T: Component>(
    path: &Path,
    key_column: &str,
) -> Result<Category<T>, LoadError> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    read_records(reader, path, key_column)
}

/// Reads one category from any CSV source.
///
/// `source` names the input in diagnostics.
///
/// # Errors
///
/// Returns an error if the header cannot be read or has no `key_column`.
pub fn read_category<T: Component, R: io::Read>(
    input: R,
    source: &Path,
    key_column: &str,
) -> Result<Category<T>, LoadError> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    read_records(reader, source, key_column)
}

fn read_records<T: Component, R: io::Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
    key_column: &str,
) -> Result<Category<T>, LoadError> {
    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let key_index = headers
        .iter()
        .position(|h| h == key_column)
        .ok_or_else(|| LoadError::MissingKeyColumn {
            path: path.to_path_buf(),
            column: key_column.to_string(),
        })?;

    let mut category = Category::new();
    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %path.display(), row = row + 1, "skipping malformed row: {e}");
                continue;
            }
        };

        let name = record.get(key_index).unwrap_or_default();
        if name.is_empty() {
            warn!(path = %path.display(), row = row + 1, "skipping row without a {key_column}");
            continue;
        }

        let attributes: ComponentRecord = headers.iter().zip(record.iter()).collect();
        if category.insert_record(name, &attributes).is_some() {
            debug!(path = %path.display(), name, "duplicate {} replaced", T::KIND);
        }
    }

    debug!(
        path = %path.display(),
        count = category.len(),
        "loaded {} catalog",
        T::KIND
    );
    Ok(category)
}

/// Errors loading a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or its header could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Csv {
        /// The catalog file.
        path: PathBuf,
        /// The underlying error.
        source: csv::Error,
    },

    /// The header row lacks the name column.
    #[error("{} has no '{column}' column", path.display())]
    MissingKeyColumn {
        /// The catalog file.
        path: PathBuf,
        /// The expected name column.
        column: String,
    },
}

/// Convenience wrappers used by the CLI and tests.
impl Catalog {
    /// Loads a catalog as described by the configuration.
    ///
    /// # Errors
    ///
    /// See [`load_catalog`].
    pub fn load(config: &CatalogConfig) -> Result<Self, LoadError> {
        load_catalog(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::domain::{Cpu, KeyColumns, Ram, Ssd};

    const CPUS: &str = "\
cpuName,socket,MemoryType,MaxRAMSpeed,SupportedChipsets,cores
Ryzen 5 3600,AM4,DDR4,DDR4-3200,\"B450,X570\",6
Core i5-12400,LGA1700,DDR4,DDR4-3200,B660,6
";

    fn read<T: Component>(csv: &str, key: &str) -> Result<Category<T>, LoadError> {
        read_category(csv.as_bytes(), Path::new("test.csv"), key)
    }

    #[test]
    fn reads_rows_in_order() {
        let cpus: Category<Cpu> = read(CPUS, "cpuName").unwrap();

        let names: Vec<_> = cpus.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Ryzen 5 3600", "Core i5-12400"]);

        let ryzen = cpus.get("Ryzen 5 3600").unwrap();
        assert_eq!(ryzen.socket.as_str(), Some("AM4"));
        assert_eq!(ryzen.max_ram_speed.value(), Some(3200));
        assert_eq!(
            ryzen.supported_chipsets.iter().collect::<Vec<_>>(),
            ["B450", "X570"]
        );
    }

    #[test]
    fn missing_key_column_is_an_error() {
        let err = read::<Cpu>(CPUS, "Name").unwrap_err();
        assert!(matches!(err, LoadError::MissingKeyColumn { column, .. } if column == "Name"));
    }

    #[test]
    fn short_rows_leave_attributes_empty() {
        let ram: Category<Ram> = read("model,type,speed\nVengeance,DDR4\n", "model").unwrap();
        let module = ram.get("Vengeance").unwrap();
        assert_eq!(module.memory_type.as_str(), Some("DDR4"));
        assert_eq!(module.speed.value(), None);
    }

    #[test]
    fn rows_without_names_are_skipped() {
        let ssds: Category<Ssd> =
            read("Model,Interface,FormFactor\n,NVMe,M.2\n970 EVO,NVMe,M.2\n", "Model").unwrap();
        assert_eq!(ssds.len(), 1);
        assert!(ssds.get("970 EVO").is_some());
    }

    #[test]
    fn later_duplicates_replace_earlier_rows() {
        let ssds: Category<Ssd> = read(
            "Model,Interface,FormFactor\nA,SATA,M.2\nB,NVMe,M.2\nA,NVMe,M.2\n",
            "Model",
        )
        .unwrap();

        let names: Vec<_> = ssds.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(ssds.get("A").unwrap().interface.as_str(), Some("NVMe"));
    }

    fn write_catalog(dir: &TempDir) -> CatalogConfig {
        let root = dir.path();
        fs::write(root.join("cpus.csv"), CPUS).unwrap();
        fs::write(
            root.join("ram.csv"),
            "model,type,speed\nVengeance LPX,DDR4,DDR4-3200\n",
        )
        .unwrap();
        fs::write(
            root.join("boards.csv"),
            "Name,Socket,Chipset,MemoryType,MaxRAMSpeed,SupportedStorageInterfaces,SupportedFormFactors\n\
             B450 Tomahawk,AM4,B450,DDR4,DDR4-3200,\"NVMe,SATA\",M.2\n",
        )
        .unwrap();

        CatalogConfig {
            cpus: root.join("cpus.csv"),
            ram: root.join("ram.csv"),
            motherboards: root.join("boards.csv"),
            ssds: root.join("ssds.csv"),
            strict: false,
            keys: KeyColumns::default(),
        }
    }

    #[test]
    fn lenient_load_leaves_missing_files_empty() {
        let dir = TempDir::new().unwrap();
        let config = write_catalog(&dir);

        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.cpus.len(), 2);
        assert_eq!(catalog.ram.len(), 1);
        assert_eq!(catalog.motherboards.len(), 1);
        assert!(catalog.ssds.is_empty());
        assert_eq!(catalog.combinations(), 0);
    }

    #[test]
    fn strict_load_reports_missing_files() {
        let dir = TempDir::new().unwrap();
        let config = CatalogConfig {
            strict: true,
            ..write_catalog(&dir)
        };

        let err = Catalog::load(&config).unwrap_err();
        assert!(matches!(err, LoadError::Csv { ref path, .. } if path.ends_with("ssds.csv")));
    }
}
