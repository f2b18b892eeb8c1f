//! An in-memory catalog of components
//!
//! The [`Catalog`] knows nothing about files. It holds four independent
//! [`Category`] collections, each preserving insertion order and indexing
//! components by name.

use std::{
    collections::HashMap,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use crate::domain::component::{
    Component, ComponentKind, ComponentRecord, Cpu, Motherboard, Ram, Ssd,
};

/// A typed handle to one component within a [`Category`].
///
/// Identifiers are positions in insertion order and correspond one-to-one
/// with component names in the catalog they came from.
pub struct Id<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    const fn new(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the position of the component in its category.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Id({})", self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<T> {
    name: String,
    record: T,
}

/// The components of a single category, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category<T> {
    /// The components, stored contiguously.
    entries: Vec<Entry<T>>,

    /// An index from name to position in `entries`.
    index: HashMap<String, u32>,
}

impl<T> Default for Category<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Category<T> {
    /// Creates an empty category.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a component.
    ///
    /// Inserting a name that is already present replaces its record in place
    /// and returns the old one; the component keeps its original position.
    ///
    /// # Panics
    ///
    /// Panics if the category grows beyond `u32::MAX` components.
    pub fn insert(&mut self, name: impl Into<String>, record: T) -> Option<T> {
        let name = name.into();
        if let Some(&position) = self.index.get(&name) {
            let entry = &mut self.entries[position as usize];
            return Some(std::mem::replace(&mut entry.record, record));
        }

        let position = u32::try_from(self.entries.len()).expect("category size exceeds u32");
        self.index.insert(name.clone(), position);
        self.entries.push(Entry { name, record });
        None
    }

    /// Looks up the identifier of a named component.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<Id<T>> {
        self.index.get(name).map(|&index| Id::new(index))
    }

    /// Looks up a component by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.id(name).and_then(|id| self.record(id))
    }

    /// Returns the record for an identifier.
    ///
    /// Returns `None` for an identifier that does not belong to this category.
    #[must_use]
    pub fn record(&self, id: Id<T>) -> Option<&T> {
        self.entries.get(id.index()).map(|entry| &entry.record)
    }

    /// Returns the name for an identifier.
    #[must_use]
    pub fn name(&self, id: Id<T>) -> Option<&str> {
        self.entries.get(id.index()).map(|entry| entry.name.as_str())
    }

    /// Iterates over identifiers in insertion order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn ids(&self) -> impl ExactSizeIterator<Item = Id<T>> + Clone + use<T> {
        (0..self.entries.len() as u32).map(Id::new)
    }

    /// Iterates over `(name, record)` pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), &entry.record))
    }

    /// The number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the category has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Component> Category<T> {
    /// Parses a raw record and inserts it.
    pub fn insert_record(&mut self, name: impl Into<String>, record: &ComponentRecord) -> Option<T> {
        self.insert(name, T::from_record(record))
    }
}

impl<T, N: Into<String>> FromIterator<(N, T)> for Category<T> {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut category = Self::new();
        for (name, record) in iter {
            category.insert(name, record);
        }
        category
    }
}

/// The four read-only component categories.
///
/// Names are scoped to their category: the same string may name a CPU and an
/// SSD without conflict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Processors.
    pub cpus: Category<Cpu>,
    /// Memory modules.
    pub ram: Category<Ram>,
    /// Motherboards.
    pub motherboards: Category<Motherboard>,
    /// Solid-state drives.
    pub ssds: Category<Ssd>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of 4-tuples in the cross product of all categories.
    #[must_use]
    pub fn combinations(&self) -> u128 {
        [
            self.cpus.len(),
            self.ram.len(),
            self.motherboards.len(),
            self.ssds.len(),
        ]
        .into_iter()
        .map(|n| n as u128)
        .product()
    }

    /// Returns `true` if the category of `kind` has a component called `name`.
    #[must_use]
    pub fn contains(&self, kind: ComponentKind, name: &str) -> bool {
        match kind {
            ComponentKind::Cpu => self.cpus.id(name).is_some(),
            ComponentKind::Ram => self.ram.id(name).is_some(),
            ComponentKind::Motherboard => self.motherboards.id(name).is_some(),
            ComponentKind::Ssd => self.ssds.id(name).is_some(),
        }
    }

    /// Returns `true` if any category is empty, in which case no combination
    /// can exist.
    #[must_use]
    pub fn has_empty_category(&self) -> bool {
        self.cpus.is_empty()
            || self.ram.is_empty()
            || self.motherboards.is_empty()
            || self.ssds.is_empty()
    }
}
