//! Component records for the four catalog categories.

use std::{collections::BTreeMap, fmt};

use crate::domain::attribute::{Attr, AttrSet, Speed};

/// A raw catalog record: free-text attributes keyed by column name.
///
/// Attribute access never fails. A column that is missing from the record
/// reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentRecord {
    attributes: BTreeMap<String, String>,
}

impl ComponentRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, returning the record for chaining.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Sets an attribute.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(column.into(), value.into());
    }

    /// Returns the attribute value, or `""` if the column is absent.
    #[must_use]
    pub fn attribute(&self, column: &str) -> &str {
        self.attributes.get(column).map_or("", String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for ComponentRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The four catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Processors.
    Cpu,
    /// Memory modules.
    Ram,
    /// Motherboards.
    Motherboard,
    /// Drives.
    Ssd,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Cpu => "CPU",
            Self::Ram => "RAM",
            Self::Motherboard => "Motherboard",
            Self::Ssd => "SSD",
        })
    }
}

/// A component category, with the typed record it parses into.
pub trait Component: Sized + Send + Sync {
    /// The category this record belongs to.
    const KIND: ComponentKind;

    /// Builds the typed record from its raw attributes.
    fn from_record(record: &ComponentRecord) -> Self;
}

/// A processor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cpu {
    /// CPU socket, e.g. `AM4`.
    pub socket: Attr,
    /// Supported memory type, e.g. `DDR4`.
    pub memory_type: Attr,
    /// Highest supported RAM speed.
    pub max_ram_speed: Speed,
    /// Motherboard chipsets the CPU works with.
    pub supported_chipsets: AttrSet,
}

impl Component for Cpu {
    const KIND: ComponentKind = ComponentKind::Cpu;

    fn from_record(record: &ComponentRecord) -> Self {
        Self {
            socket: Attr::parse(record.attribute("socket")),
            memory_type: Attr::parse(record.attribute("MemoryType")),
            max_ram_speed: Speed::parse(record.attribute("MaxRAMSpeed")),
            supported_chipsets: AttrSet::parse(record.attribute("SupportedChipsets")),
        }
    }
}

/// A memory module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ram {
    /// Memory type, e.g. `DDR4`.
    pub memory_type: Attr,
    /// Rated speed.
    pub speed: Speed,
}

impl Component for Ram {
    const KIND: ComponentKind = ComponentKind::Ram;

    fn from_record(record: &ComponentRecord) -> Self {
        Self {
            memory_type: Attr::parse(record.attribute("type")),
            speed: Speed::parse(record.attribute("speed")),
        }
    }
}

/// A motherboard, which bridges every other category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Motherboard {
    /// CPU socket.
    pub socket: Attr,
    /// Chipset, e.g. `B450`.
    pub chipset: Attr,
    /// Supported memory type.
    pub memory_type: Attr,
    /// Highest supported RAM speed.
    pub max_ram_speed: Speed,
    /// Storage interfaces, e.g. `NVMe`, `SATA`.
    pub supported_storage_interfaces: AttrSet,
    /// Drive form factors, e.g. `M.2`.
    pub supported_form_factors: AttrSet,
}

impl Component for Motherboard {
    const KIND: ComponentKind = ComponentKind::Motherboard;

    fn from_record(record: &ComponentRecord) -> Self {
        Self {
            socket: Attr::parse(record.attribute("Socket")),
            chipset: Attr::parse(record.attribute("Chipset")),
            memory_type: Attr::parse(record.attribute("MemoryType")),
            max_ram_speed: Speed::parse(record.attribute("MaxRAMSpeed")),
            supported_storage_interfaces: AttrSet::parse(
                record.attribute("SupportedStorageInterfaces"),
            ),
            supported_form_factors: AttrSet::parse(record.attribute("SupportedFormFactors")),
        }
    }
}

/// A solid-state drive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ssd {
    /// Storage interface.
    pub interface: Attr,
    /// Physical form factor.
    pub form_factor: Attr,
}

impl Component for Ssd {
    const KIND: ComponentKind = ComponentKind::Ssd;

    fn from_record(record: &ComponentRecord) -> Self {
        Self {
            interface: Attr::parse(record.attribute("Interface")),
            form_factor: Attr::parse(record.attribute("FormFactor")),
        }
    }
}
