//! The compatibility resolution engine.
//!
//! [`rules`] decide pairwise compatibility between typed records, the
//! [`Memo`] caches every verdict, the [`CompatibilityEngine`] ties them to a
//! catalog, and the [`Enumerator`] walks the cross product.

pub mod enumerate;
pub use enumerate::{AcceptedCombination, Enumerator, Progress, Sink, StopSignal, Summary};

mod memo;
pub use memo::{Memo, MemoStats};

mod resolver;
pub use resolver::CompatibilityEngine;

/// Pure compatibility predicates.
pub mod rules;
