use clap::Parser;
use compat::{Catalog, Config};
use tracing::instrument;

use super::{CatalogArgs, terminal::Colorize};

#[derive(Debug, Parser, Default)]
#[command(about = "Show catalog sizes and the size of the cross product")]
pub struct Status {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Status {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, mut config: Config) -> anyhow::Result<()> {
        let catalog = self.catalog.load(&mut config)?;
        let counts = counts(&catalog);

        let combinations = catalog.combinations();

        match self.output {
            OutputFormat::Json => Self::output_json(&counts, combinations)?,
            OutputFormat::Table => {
                Self::output_table(&counts, combinations, catalog.has_empty_category());
            }
        }
        Ok(())
    }

    fn output_json(counts: &[(&str, usize)], combinations: u128) -> anyhow::Result<()> {
        use serde_json::json;

        let categories: serde_json::Map<_, _> = counts
            .iter()
            .map(|&(category, count)| (category.to_string(), json!(count)))
            .collect();

        let output = json!({
            "categories": categories,
            // u128 does not round-trip through JSON numbers.
            "combinations": combinations.to_string(),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(counts: &[(&str, usize)], combinations: u128, has_empty_category: bool) {
        println!("Catalog");
        println!("{}", "───────".dim());
        for &(category, count) in counts {
            let count = if count == 0 {
                count.to_string().failure()
            } else {
                count.to_string()
            };
            println!("{category:<13} {count}");
        }
        println!();
        println!("Combinations  {combinations}");

        if has_empty_category {
            println!(
                "{}",
                "An empty category means no combination can be formed.".dim()
            );
        }
    }
}

fn counts(catalog: &Catalog) -> [(&'static str, usize); 4] {
    [
        ("CPUs", catalog.cpus.len()),
        ("RAM", catalog.ram.len()),
        ("Motherboards", catalog.motherboards.len()),
        ("SSDs", catalog.ssds.len()),
    ]
}
