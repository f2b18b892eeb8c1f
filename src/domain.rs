//! Domain models for component compatibility.
//!
//! This module contains the component records, the catalog that holds them,
//! the relationship keys the engine evaluates, and run configuration.

/// Typed attribute values parsed from free-text fields.
pub mod attribute;
pub use attribute::{Attr, AttrSet, Speed};

/// Component records for each category.
pub mod component;
pub use component::{Component, ComponentKind, ComponentRecord, Cpu, Motherboard, Ram, Ssd};

pub mod catalog;
pub use catalog::{Catalog, Category, Id};

mod config;
pub use config::{CatalogConfig, Config, ConfigError, KeyColumns, OutputConfig};

/// Relationship kinds and memoization keys.
pub mod relationship;
pub use relationship::{CompatibilityKey, KeyError, RelationshipKind};
