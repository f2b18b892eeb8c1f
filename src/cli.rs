use std::path::{Path, PathBuf};

mod check;
mod enumerate;
mod status;
mod terminal;

use anyhow::Context;
use check::Check;
use clap::ArgAction;
use compat::{Catalog, Config};
use enumerate::Enumerate;
use status::Status;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    ///
    /// Defaults to `compat.toml` in the working directory, if present.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let command = self
            .command
            .unwrap_or_else(|| Command::Enumerate(Enumerate::default()));

        if let Command::Init = command {
            let path = self
                .config
                .unwrap_or_else(|| PathBuf::from(Config::FILE_NAME));
            return Init::run(&path);
        }

        let config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => Config::load_or_default(Path::new(Config::FILE_NAME))?,
        };

        command.run(config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Write compatible combinations (default)
    Enumerate(Enumerate),

    /// Write a default configuration file
    Init,

    /// Show catalog sizes
    Status(Status),

    /// Check a single relationship between named components
    ///
    /// Direct relationships take two names. Derived relationships (cpu-ssd,
    /// ram-ssd) take three: the endpoint, the bridging motherboard, and the
    /// SSD.
    Check(Check),
}

impl Command {
    fn run(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Enumerate(command) => command.run(config)?,
            Self::Init => unreachable!("handled before the configuration is loaded"),
            Self::Status(command) => command.run(config)?,
            Self::Check(command) => command.run(config)?,
        }
        Ok(())
    }
}

/// Catalog file overrides shared by every command that reads the catalog.
#[derive(Debug, Default, clap::Args)]
pub struct CatalogArgs {
    /// CSV file of CPUs
    #[arg(long, value_name = "PATH")]
    cpus: Option<PathBuf>,

    /// CSV file of RAM modules
    #[arg(long, value_name = "PATH")]
    ram: Option<PathBuf>,

    /// CSV file of motherboards
    #[arg(long, value_name = "PATH")]
    motherboards: Option<PathBuf>,

    /// CSV file of SSDs
    #[arg(long, value_name = "PATH")]
    ssds: Option<PathBuf>,

    /// Fail if any catalog file cannot be read
    #[arg(long)]
    strict: bool,
}

impl CatalogArgs {
    /// Applies the overrides and loads the catalog.
    fn load(self, config: &mut Config) -> anyhow::Result<Catalog> {
        let catalog = &mut config.catalog;
        if let Some(path) = self.cpus {
            catalog.cpus = path;
        }
        if let Some(path) = self.ram {
            catalog.ram = path;
        }
        if let Some(path) = self.motherboards {
            catalog.motherboards = path;
        }
        if let Some(path) = self.ssds {
            catalog.ssds = path;
        }
        catalog.strict |= self.strict;

        Catalog::load(catalog).context("failed to load catalog")
    }
}

pub struct Init;

impl Init {
    #[instrument]
    fn run(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }

        Config::default()
            .save(path)
            .with_context(|| format!("failed to create {}", path.display()))?;

        println!("Created {}", path.display());
        println!();
        println!("Next steps:");
        println!("  edit the [catalog] paths to point at your CSV files");
        println!("  compat status");
        println!("  compat enumerate --output compatibility_data.csv");
        Ok(())
    }
}
