use std::process;

use clap::Parser;
use compat::{Catalog, CompatibilityEngine, Config, RelationshipKind, domain::ComponentKind};
use tracing::{instrument, warn};

use super::{CatalogArgs, terminal::Colorize};

#[derive(Debug, Parser)]
pub struct Check {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// The relationship to check (e.g. cpu-ram, cpu-ssd)
    relationship: RelationshipKind,

    /// Component names, in the order the relationship lists them
    #[arg(required = true)]
    names: Vec<String>,
}

impl Check {
    /// Prints the verdict and exits with status 1 when the components are
    /// incompatible.
    #[instrument(level = "debug", skip_all, fields(relationship = %self.relationship))]
    pub fn run(self, mut config: Config) -> anyhow::Result<()> {
        let catalog = self.catalog.load(&mut config)?;
        let names: Vec<&str> = self.names.iter().map(String::as_str).collect();

        for (category, name) in unknown_names(&catalog, self.relationship, &names) {
            warn!("no {category} named '{name}' in the catalog");
        }

        let engine = CompatibilityEngine::new(&catalog);
        let compatible = engine.check(self.relationship, &names)?;

        let label = format!("{} ({})", self.relationship, names.join(", "));
        if compatible {
            println!("{} {label}", "compatible".success());
            Ok(())
        } else {
            println!("{} {label}", "incompatible".failure());
            process::exit(1);
        }
    }
}

/// Names that do not appear in the category the relationship expects them in.
fn unknown_names<'n>(
    catalog: &Catalog,
    kind: RelationshipKind,
    names: &[&'n str],
) -> Vec<(ComponentKind, &'n str)> {
    kind.participants()
        .iter()
        .zip(names)
        .filter(|&(&category, &name)| !catalog.contains(category, name))
        .map(|(&category, &name)| (category, name))
        .collect()
}
