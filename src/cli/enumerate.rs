use std::{
    fs::File,
    io::{self, Write},
    num::NonZeroUsize,
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use compat::{
    CombinationWriter, CompatibilityEngine, Config, Enumerator, OutputFormat, engine::Progress,
};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{info, instrument};

use super::CatalogArgs;

#[derive(Debug, Parser, Default)]
#[command(about = "Write every compatible CPU, RAM, motherboard and SSD combination")]
pub struct Enumerate {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output format (csv, json)
    #[arg(long, value_name = "FORMAT")]
    format: Option<Format>,

    /// Stop after this many combinations
    #[arg(long, value_name = "N")]
    limit: Option<NonZeroUsize>,

    /// Worker threads (1 runs sequentially; defaults to one per core)
    #[arg(short, long, value_name = "N")]
    jobs: Option<NonZeroUsize>,

    /// Do not draw a progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
        }
    }
}

impl Enumerate {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, mut config: Config) -> anyhow::Result<()> {
        let catalog = self.catalog.load(&mut config)?;
        let output = config.output;

        let path = self.output.or(output.path);
        let format = self.format.map_or(output.format, OutputFormat::from);
        let limit = self.limit.or_else(|| output.limit.and_then(NonZeroUsize::new));
        let jobs = self.jobs.or_else(|| output.jobs.and_then(NonZeroUsize::new));

        let writer: Box<dyn Write + Send> = match &path {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?,
            ),
            None => Box::new(io::stdout()),
        };
        let mut sink = CombinationWriter::new(format, writer)?;

        let progress = ProgressReporter::new(self.no_progress)?;
        let engine = CompatibilityEngine::new(&catalog);
        let enumerator = Enumerator::new(&engine)
            .limit(limit)
            .parallel(jobs.is_none_or(|jobs| jobs.get() > 1))
            .progress(&progress);

        let summary = match jobs {
            Some(jobs) if jobs.get() > 1 => rayon::ThreadPoolBuilder::new()
                .num_threads(jobs.get())
                .build()
                .context("failed to start worker threads")?
                .install(|| enumerator.run(&mut sink)),
            _ => enumerator.run(&mut sink),
        }?;
        sink.finish()?;

        info!(summary = %serde_json::to_string(&summary)?, "wrote combinations");
        if let Some(path) = path {
            eprintln!(
                "Wrote {} combinations to {}",
                summary.accepted,
                path.display()
            );
        }
        Ok(())
    }
}

/// Draws enumeration progress on stderr.
struct ProgressReporter(ProgressBar);

impl ProgressReporter {
    fn new(hidden: bool) -> anyhow::Result<Self> {
        if hidden {
            return Ok(Self(ProgressBar::hidden()));
        }

        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner} [{elapsed_precise}] {wide_bar} {human_pos}/{human_len} ({eta})",
            )?,
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(Self(bar))
    }
}

impl Progress for ProgressReporter {
    fn start(&self, total: u64) {
        self.0.set_length(total);
    }

    fn advance(&self, tuples: u64) {
        self.0.inc(tuples);
    }

    fn finish(&self) {
        self.0.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_catalog(dir: &TempDir) -> Config {
        let root = dir.path();
        fs::write(
            root.join("cpus.csv"),
            "cpuName,socket,MemoryType,MaxRAMSpeed,SupportedChipsets\n\
             Ryzen 5 3600,AM4,DDR4,DDR4-3200,\"B450,X570\"\n\
             Core i5-12400,LGA1700,DDR4,DDR4-3200,B660\n",
        )
        .unwrap();
        fs::write(
            root.join("ram.csv"),
            "model,type,speed\nVengeance LPX,DDR4,DDR4-3200\nFury,DDR5,DDR5-5600\n",
        )
        .unwrap();
        fs::write(
            root.join("boards.csv"),
            "Name,Socket,Chipset,MemoryType,MaxRAMSpeed,SupportedStorageInterfaces,SupportedFormFactors\n\
             B450 Tomahawk,AM4,B450,DDR4,DDR4-3200,\"NVMe,SATA\",M.2\n\
             X570 Aorus,AM4,X570,DDR4,DDR4-3600,NVMe,M.2\n",
        )
        .unwrap();
        fs::write(
            root.join("ssds.csv"),
            "Model,Interface,FormFactor\n970 EVO,NVMe,M.2\nMX500,SATA,2.5in\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.catalog.cpus = root.join("cpus.csv");
        config.catalog.ram = root.join("ram.csv");
        config.catalog.motherboards = root.join("boards.csv");
        config.catalog.ssds = root.join("ssds.csv");
        config
    }

    fn enumerate(dir: &TempDir, jobs: usize, format: Option<Format>) -> String {
        let path = dir.path().join("out");
        Enumerate {
            output: Some(path.clone()),
            format,
            jobs: NonZeroUsize::new(jobs),
            no_progress: true,
            ..Enumerate::default()
        }
        .run(write_catalog(dir))
        .unwrap();
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn writes_csv_with_header() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            enumerate(&dir, 1, None),
            "CPU,RAM,Motherboard,SSD\n\
             Ryzen 5 3600,Vengeance LPX,B450 Tomahawk,970 EVO\n\
             Ryzen 5 3600,Vengeance LPX,X570 Aorus,970 EVO\n"
        );
    }

    #[test]
    fn worker_pool_matches_sequential_output() {
        let dir = TempDir::new().unwrap();
        assert_eq!(enumerate(&dir, 4, None), enumerate(&dir, 1, None));
    }

    #[test]
    fn json_output_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let output = enumerate(&dir, 1, Some(Format::Json));
        assert_eq!(output.lines().count(), 2);
        assert!(output.starts_with("{\"CPU\":\"Ryzen 5 3600\""));
    }

    #[test]
    fn limit_from_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let mut config = write_catalog(&dir);
        config.output.path = Some(path.clone());
        config.output.limit = Some(1);

        Enumerate {
            no_progress: true,
            jobs: NonZeroUsize::new(1),
            ..Enumerate::default()
        }
        .run(config)
        .unwrap();

        assert_eq!(fs::read_to_string(path).unwrap().lines().count(), 2);
    }
}
