//! File adapters around the engine: CSV catalogs in, combinations out.

mod loader;
mod sink;

pub use loader::{LoadError, load_catalog, load_category, read_category};
pub use sink::{CombinationWriter, OutputFormat, SinkError};
