use tracing::trace;

use crate::{
    domain::{Catalog, CompatibilityKey, Cpu, Id, KeyError, Motherboard, Ram, RelationshipKind, Ssd},
    engine::{
        memo::{Memo, MemoStats},
        rules,
    },
};

/// Answers compatibility questions about one catalog.
///
/// The engine owns its cache; separate engines never share verdicts. Every
/// verdict is a pure function of the catalog, which the engine borrows
/// immutably for its whole lifetime.
#[derive(Debug)]
pub struct CompatibilityEngine<'c> {
    catalog: &'c Catalog,
    memo: Memo,
}

impl<'c> CompatibilityEngine<'c> {
    /// Creates an engine with an empty cache.
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            memo: Memo::new(),
        }
    }

    /// The catalog this engine answers questions about.
    #[must_use]
    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Cache counters.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.memo.stats()
    }

    /// Evaluates a compatibility fact, consulting the cache first.
    ///
    /// An identifier that does not belong to this engine's catalog makes the
    /// relationship false.
    pub fn evaluate(&self, key: CompatibilityKey) -> bool {
        self.memo.evaluate(key, || {
            let verdict = self.apply(key);
            trace!(
                kind = %key.kind(),
                names = ?key.names(self.catalog),
                verdict,
                "evaluated"
            );
            verdict
        })
    }

    /// Evaluates a relationship between named components.
    ///
    /// Derived relationships take `[endpoint, motherboard, ssd]`. Names that
    /// are not in their category make the relationship false.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of names does not match the
    /// relationship.
    pub fn check(&self, kind: RelationshipKind, names: &[&str]) -> Result<bool, KeyError> {
        let key = CompatibilityKey::resolve(self.catalog, kind, names)?;
        Ok(key.is_some_and(|key| self.evaluate(key)))
    }

    /// See [`rules::cpu_ram`].
    pub fn cpu_ram(&self, cpu: Id<Cpu>, ram: Id<Ram>) -> bool {
        self.evaluate(CompatibilityKey::CpuRam(cpu, ram))
    }

    /// See [`rules::cpu_motherboard`].
    pub fn cpu_motherboard(&self, cpu: Id<Cpu>, motherboard: Id<Motherboard>) -> bool {
        self.evaluate(CompatibilityKey::CpuMotherboard(cpu, motherboard))
    }

    /// See [`rules::ram_motherboard`].
    pub fn ram_motherboard(&self, ram: Id<Ram>, motherboard: Id<Motherboard>) -> bool {
        self.evaluate(CompatibilityKey::RamMotherboard(ram, motherboard))
    }

    /// See [`rules::motherboard_ssd`].
    pub fn motherboard_ssd(&self, motherboard: Id<Motherboard>, ssd: Id<Ssd>) -> bool {
        self.evaluate(CompatibilityKey::MotherboardSsd(motherboard, ssd))
    }

    /// See [`rules::cpu_ssd`].
    pub fn cpu_ssd(&self, cpu: Id<Cpu>, motherboard: Id<Motherboard>, ssd: Id<Ssd>) -> bool {
        self.evaluate(CompatibilityKey::CpuSsd(cpu, motherboard, ssd))
    }

    /// See [`rules::ram_ssd`].
    pub fn ram_ssd(&self, ram: Id<Ram>, motherboard: Id<Motherboard>, ssd: Id<Ssd>) -> bool {
        self.evaluate(CompatibilityKey::RamSsd(ram, motherboard, ssd))
    }

    /// Runs the rule for a key.
    ///
    /// Derived relationships go back through the cache for their two legs, so
    /// the direct verdicts they depend on are shared with direct queries.
    fn apply(&self, key: CompatibilityKey) -> bool {
        let catalog = self.catalog;
        match key {
            CompatibilityKey::CpuRam(cpu, ram) => {
                match (catalog.cpus.record(cpu), catalog.ram.record(ram)) {
                    (Some(cpu), Some(ram)) => rules::cpu_ram(cpu, ram),
                    _ => false,
                }
            }
            CompatibilityKey::CpuMotherboard(cpu, motherboard) => match (
                catalog.cpus.record(cpu),
                catalog.motherboards.record(motherboard),
            ) {
                (Some(cpu), Some(motherboard)) => rules::cpu_motherboard(cpu, motherboard),
                _ => false,
            },
            CompatibilityKey::RamMotherboard(ram, motherboard) => match (
                catalog.ram.record(ram),
                catalog.motherboards.record(motherboard),
            ) {
                (Some(ram), Some(motherboard)) => rules::ram_motherboard(ram, motherboard),
                _ => false,
            },
            CompatibilityKey::MotherboardSsd(motherboard, ssd) => match (
                catalog.motherboards.record(motherboard),
                catalog.ssds.record(ssd),
            ) {
                (Some(motherboard), Some(ssd)) => rules::motherboard_ssd(motherboard, ssd),
                _ => false,
            },
            CompatibilityKey::CpuSsd(cpu, motherboard, ssd) => {
                self.cpu_motherboard(cpu, motherboard) && self.motherboard_ssd(motherboard, ssd)
            }
            CompatibilityKey::RamSsd(ram, motherboard, ssd) => {
                self.ram_motherboard(ram, motherboard) && self.motherboard_ssd(motherboard, ssd)
            }
        }
    }
}
