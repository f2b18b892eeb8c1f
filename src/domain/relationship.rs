//! Relationship kinds and the keys that identify evaluated facts.

use std::{fmt, str::FromStr};

use crate::domain::{
    catalog::{Catalog, Id},
    component::{ComponentKind, Cpu, Motherboard, Ram, Ssd},
};

/// Which pairwise compatibility rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationshipKind {
    /// Processor and memory module.
    CpuRam,
    /// Processor and motherboard.
    CpuMotherboard,
    /// Memory module and motherboard.
    RamMotherboard,
    /// Motherboard and drive.
    MotherboardSsd,
    /// Processor and drive, bridged through a motherboard.
    CpuSsd,
    /// Memory module and drive, bridged through a motherboard.
    RamSsd,
}

impl RelationshipKind {
    /// Every kind, in the order the enumerator checks them.
    pub const ALL: [Self; 6] = [
        Self::CpuRam,
        Self::CpuMotherboard,
        Self::CpuSsd,
        Self::RamMotherboard,
        Self::RamSsd,
        Self::MotherboardSsd,
    ];

    /// Returns `true` for relationships evaluated through a bridging
    /// motherboard.
    #[must_use]
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::CpuSsd | Self::RamSsd)
    }

    /// The number of component names a key of this kind carries.
    #[must_use]
    pub const fn arity(self) -> usize {
        if self.is_derived() { 3 } else { 2 }
    }

    /// The categories of the participants, in key order.
    #[must_use]
    pub const fn participants(self) -> &'static [ComponentKind] {
        use ComponentKind::{Cpu, Motherboard, Ram, Ssd};

        match self {
            Self::CpuRam => &[Cpu, Ram],
            Self::CpuMotherboard => &[Cpu, Motherboard],
            Self::RamMotherboard => &[Ram, Motherboard],
            Self::MotherboardSsd => &[Motherboard, Ssd],
            Self::CpuSsd => &[Cpu, Motherboard, Ssd],
            Self::RamSsd => &[Ram, Motherboard, Ssd],
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::CpuRam => "cpu-ram",
            Self::CpuMotherboard => "cpu-motherboard",
            Self::RamMotherboard => "ram-motherboard",
            Self::MotherboardSsd => "motherboard-ssd",
            Self::CpuSsd => "cpu-ssd",
            Self::RamSsd => "ram-ssd",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalised)
            .ok_or_else(|| KeyError::UnknownKind(s.to_string()))
    }
}

/// Identifies one evaluated compatibility fact.
///
/// Direct relationships are keyed by the pair of participants. Derived
/// relationships also carry the bridging motherboard, because their verdict
/// depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompatibilityKey {
    /// See [`RelationshipKind::CpuRam`].
    CpuRam(Id<Cpu>, Id<Ram>),
    /// See [`RelationshipKind::CpuMotherboard`].
    CpuMotherboard(Id<Cpu>, Id<Motherboard>),
    /// See [`RelationshipKind::RamMotherboard`].
    RamMotherboard(Id<Ram>, Id<Motherboard>),
    /// See [`RelationshipKind::MotherboardSsd`].
    MotherboardSsd(Id<Motherboard>, Id<Ssd>),
    /// See [`RelationshipKind::CpuSsd`].
    CpuSsd(Id<Cpu>, Id<Motherboard>, Id<Ssd>),
    /// See [`RelationshipKind::RamSsd`].
    RamSsd(Id<Ram>, Id<Motherboard>, Id<Ssd>),
}

impl CompatibilityKey {
    /// The relationship this key belongs to.
    #[must_use]
    pub const fn kind(&self) -> RelationshipKind {
        match self {
            Self::CpuRam(..) => RelationshipKind::CpuRam,
            Self::CpuMotherboard(..) => RelationshipKind::CpuMotherboard,
            Self::RamMotherboard(..) => RelationshipKind::RamMotherboard,
            Self::MotherboardSsd(..) => RelationshipKind::MotherboardSsd,
            Self::CpuSsd(..) => RelationshipKind::CpuSsd,
            Self::RamSsd(..) => RelationshipKind::RamSsd,
        }
    }

    /// Builds a key from component names.
    ///
    /// Derived kinds take `[endpoint, motherboard, ssd]`. Returns `Ok(None)`
    /// when any name is not in its category.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Arity`] if the number of names does not match the
    /// relationship.
    pub fn resolve(
        catalog: &Catalog,
        kind: RelationshipKind,
        names: &[&str],
    ) -> Result<Option<Self>, KeyError> {
        if names.len() != kind.arity() {
            return Err(KeyError::Arity {
                kind,
                expected: kind.arity(),
                found: names.len(),
            });
        }

        Ok(Self::lookup(catalog, kind, names))
    }

    fn lookup(catalog: &Catalog, kind: RelationshipKind, names: &[&str]) -> Option<Self> {
        let cpus = &catalog.cpus;
        let ram = &catalog.ram;
        let boards = &catalog.motherboards;
        let ssds = &catalog.ssds;

        let key = match (kind, names) {
            (RelationshipKind::CpuRam, [c, r]) => Self::CpuRam(cpus.id(c)?, ram.id(r)?),
            (RelationshipKind::CpuMotherboard, [c, m]) => {
                Self::CpuMotherboard(cpus.id(c)?, boards.id(m)?)
            }
            (RelationshipKind::RamMotherboard, [r, m]) => {
                Self::RamMotherboard(ram.id(r)?, boards.id(m)?)
            }
            (RelationshipKind::MotherboardSsd, [m, s]) => {
                Self::MotherboardSsd(boards.id(m)?, ssds.id(s)?)
            }
            (RelationshipKind::CpuSsd, [c, m, s]) => {
                Self::CpuSsd(cpus.id(c)?, boards.id(m)?, ssds.id(s)?)
            }
            (RelationshipKind::RamSsd, [r, m, s]) => {
                Self::RamSsd(ram.id(r)?, boards.id(m)?, ssds.id(s)?)
            }
            _ => return None,
        };
        Some(key)
    }

    /// Resolves the participant names for display.
    #[must_use]
    pub fn names<'c>(&self, catalog: &'c Catalog) -> Vec<Option<&'c str>> {
        let cpus = &catalog.cpus;
        let ram = &catalog.ram;
        let boards = &catalog.motherboards;
        let ssds = &catalog.ssds;

        match *self {
            Self::CpuRam(c, r) => vec![cpus.name(c), ram.name(r)],
            Self::CpuMotherboard(c, m) => vec![cpus.name(c), boards.name(m)],
            Self::RamMotherboard(r, m) => vec![ram.name(r), boards.name(m)],
            Self::MotherboardSsd(m, s) => vec![boards.name(m), ssds.name(s)],
            Self::CpuSsd(c, m, s) => vec![cpus.name(c), boards.name(m), ssds.name(s)],
            Self::RamSsd(r, m, s) => vec![ram.name(r), boards.name(m), ssds.name(s)],
        }
    }
}

/// Errors building a [`CompatibilityKey`] from user input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyError {
    /// The relationship name was not recognised.
    #[error("unknown relationship '{0}' (expected one of cpu-ram, cpu-motherboard, ram-motherboard, motherboard-ssd, cpu-ssd, ram-ssd)")]
    UnknownKind(String),

    /// The wrong number of component names was given.
    #[error("relationship {kind} takes {expected} component names, got {found}")]
    Arity {
        /// The relationship requested.
        kind: RelationshipKind,
        /// The number of names it takes.
        expected: usize,
        /// The number of names given.
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.cpus.insert("Ryzen 5 3600", Cpu::default());
        catalog.ram.insert("Vengeance", Ram::default());
        catalog.motherboards.insert("B450 Tomahawk", Motherboard::default());
        catalog.ssds.insert("970 EVO", Ssd::default());
        catalog
    }

    #[test_case("cpu-ram", RelationshipKind::CpuRam)]
    #[test_case("CPU_SSD", RelationshipKind::CpuSsd)]
    #[test_case("motherboard-ssd", RelationshipKind::MotherboardSsd)]
    fn parses_kind(input: &str, expected: RelationshipKind) {
        assert_eq!(input.parse::<RelationshipKind>().unwrap(), expected);
    }

    #[test]
    fn participants_match_arity() {
        for kind in RelationshipKind::ALL {
            assert_eq!(kind.participants().len(), kind.arity());
        }
        assert_eq!(
            RelationshipKind::RamSsd.participants(),
            [ComponentKind::Ram, ComponentKind::Motherboard, ComponentKind::Ssd]
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        assert_eq!(
            "gpu-ram".parse::<RelationshipKind>(),
            Err(KeyError::UnknownKind("gpu-ram".to_string()))
        );
    }

    #[test]
    fn derived_keys_include_the_bridge() {
        let catalog = catalog();
        let key = CompatibilityKey::resolve(
            &catalog,
            RelationshipKind::CpuSsd,
            &["Ryzen 5 3600", "B450 Tomahawk", "970 EVO"],
        )
        .unwrap()
        .unwrap();

        assert_eq!(key.kind(), RelationshipKind::CpuSsd);
        assert_eq!(
            key.names(&catalog),
            [Some("Ryzen 5 3600"), Some("B450 Tomahawk"), Some("970 EVO")]
        );
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        let catalog = catalog();
        let key =
            CompatibilityKey::resolve(&catalog, RelationshipKind::CpuRam, &["Ryzen 5 3600", "nope"]);
        assert_eq!(key, Ok(None));
    }

    #[test]
    fn names_are_looked_up_in_their_own_category() {
        let catalog = catalog();
        // "970 EVO" is an SSD, not a RAM module.
        let key =
            CompatibilityKey::resolve(&catalog, RelationshipKind::CpuRam, &["Ryzen 5 3600", "970 EVO"]);
        assert_eq!(key, Ok(None));
    }

    #[test]
    fn wrong_arity_is_an_error() {
        let catalog = catalog();
        let err = CompatibilityKey::resolve(&catalog, RelationshipKind::RamSsd, &["Vengeance", "970 EVO"])
            .unwrap_err();
        assert_eq!(
            err,
            KeyError::Arity {
                kind: RelationshipKind::RamSsd,
                expected: 3,
                found: 2
            }
        );
    }
}
