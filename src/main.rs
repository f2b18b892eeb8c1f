//! `compat` enumerates mutually compatible PC component combinations from CSV
//! catalogs.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
