//! Hardware component compatibility resolution
//!
//! Given catalogs of CPUs, RAM modules, motherboards and SSDs, find every
//! combination of one of each whose parts are mutually compatible.
//!
//! ```
//! use compat::{Catalog, CompatibilityEngine, ComponentRecord, Enumerator};
//!
//! let mut catalog = Catalog::new();
//! catalog.cpus.insert_record(
//!     "Ryzen 5 3600",
//!     &ComponentRecord::new()
//!         .with("socket", "AM4")
//!         .with("MemoryType", "DDR4")
//!         .with("MaxRAMSpeed", "DDR4-3200")
//!         .with("SupportedChipsets", "B450,X570"),
//! );
//! catalog.ram.insert_record(
//!     "Vengeance LPX",
//!     &ComponentRecord::new().with("type", "DDR4").with("speed", "DDR4-3200"),
//! );
//! catalog.motherboards.insert_record(
//!     "B450 Tomahawk",
//!     &ComponentRecord::new()
//!         .with("Socket", "AM4")
//!         .with("Chipset", "B450")
//!         .with("MemoryType", "DDR4")
//!         .with("MaxRAMSpeed", "DDR4-3200")
//!         .with("SupportedStorageInterfaces", "NVMe,SATA")
//!         .with("SupportedFormFactors", "M.2"),
//! );
//! catalog.ssds.insert_record(
//!     "970 EVO",
//!     &ComponentRecord::new().with("Interface", "NVMe").with("FormFactor", "M.2"),
//! );
//!
//! let engine = CompatibilityEngine::new(&catalog);
//! let mut accepted = Vec::new();
//! Enumerator::new(&engine).run(&mut accepted).unwrap();
//!
//! assert_eq!(accepted.len(), 1);
//! assert_eq!(accepted[0].motherboard, "B450 Tomahawk");
//! ```

pub mod domain;
pub use domain::{
    Catalog, CompatibilityKey, ComponentRecord, Config, Cpu, Motherboard, Ram, RelationshipKind,
    Ssd,
};

/// Compatibility rules, verdict cache and combination enumeration.
pub mod engine;
pub use engine::{AcceptedCombination, CompatibilityEngine, Enumerator, Sink, StopSignal, Summary};

/// CSV catalog loading and combination output.
pub mod storage;
pub use storage::{CombinationWriter, LoadError, OutputFormat};
