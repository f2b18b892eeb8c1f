//! Enumeration of compatible component combinations.
//!
//! The [`Enumerator`] walks the cross product of the catalog CPU-major, then
//! RAM, then motherboard, then SSD, each in insertion order. Every tuple is
//! checked against the six relationships in a fixed order, stopping at the
//! first failure:
//!
//! 1. CPU ↔ RAM
//! 2. CPU ↔ motherboard
//! 3. CPU ↔ SSD, through the current motherboard
//! 4. RAM ↔ motherboard
//! 5. RAM ↔ SSD, through the current motherboard
//! 6. motherboard ↔ SSD
//!
//! The first two checks do not depend on the inner loops, so they are made
//! once per enclosing iteration. This rejects exactly the tuples the per-tuple
//! order would.

use std::{
    convert::Infallible,
    num::NonZeroUsize,
    ops::ControlFlow,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    domain::{Cpu, Id},
    engine::{CompatibilityEngine, MemoStats},
};

/// Four component names that pass every compatibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AcceptedCombination<'c> {
    /// Processor name.
    #[serde(rename = "CPU")]
    pub cpu: &'c str,
    /// Memory module name.
    #[serde(rename = "RAM")]
    pub ram: &'c str,
    /// Motherboard name.
    #[serde(rename = "Motherboard")]
    pub motherboard: &'c str,
    /// Drive name.
    #[serde(rename = "SSD")]
    pub ssd: &'c str,
}

/// Receives accepted combinations in enumeration order.
pub trait Sink<'c> {
    /// The error returned when a combination cannot be consumed.
    type Error;

    /// Consumes one accepted combination.
    ///
    /// # Errors
    ///
    /// An error aborts the enumeration and is returned to its caller.
    fn accept(&mut self, combination: AcceptedCombination<'c>) -> Result<(), Self::Error>;
}

impl<'c> Sink<'c> for Vec<AcceptedCombination<'c>> {
    type Error = Infallible;

    fn accept(&mut self, combination: AcceptedCombination<'c>) -> Result<(), Self::Error> {
        self.push(combination);
        Ok(())
    }
}

/// Observes enumeration progress.
///
/// Progress is reported in tuples of the cross product covered, once per CPU.
pub trait Progress: Sync {
    /// Called once before enumeration with the size of the cross product.
    fn start(&self, _total: u64) {}

    /// Called as each CPU's share of the cross product is finished.
    fn advance(&self, _tuples: u64) {}

    /// Called once when enumeration stops, for whatever reason.
    fn finish(&self) {}
}

impl Progress for () {}

/// A cancellation flag shared between an enumeration and its controller.
///
/// The enumerator checks the flag before each CPU, or before each chunk of
/// CPUs when running in parallel. Work already started is always finished.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// Creates a signal that has not been raised.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the enumeration to stop.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`stop`](Self::stop) has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The outcome of an enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Tuples of the cross product covered, accepted or not.
    pub examined: u64,
    /// Combinations forwarded to the sink.
    pub accepted: u64,
    /// Whether the enumeration ended before covering the cross product.
    pub stopped_early: bool,
    /// Cache counters at the end of the run.
    pub cache: MemoStats,
}

/// Running totals of an enumeration.
#[derive(Debug, Default)]
struct Coverage {
    examined: u64,
    accepted: usize,
    stopped_early: bool,
}

/// Drives a [`CompatibilityEngine`] over the cross product of its catalog.
pub struct Enumerator<'e, 'c> {
    engine: &'e CompatibilityEngine<'c>,
    limit: Option<NonZeroUsize>,
    parallel: bool,
    stop: StopSignal,
    progress: &'e dyn Progress,
}

impl<'e, 'c> Enumerator<'e, 'c> {
    /// Creates a sequential, unlimited enumerator.
    #[must_use]
    pub fn new(engine: &'e CompatibilityEngine<'c>) -> Self {
        Self {
            engine,
            limit: None,
            parallel: false,
            stop: StopSignal::new(),
            progress: &(),
        }
    }

    /// Stops after `limit` accepted combinations.
    ///
    /// Parallel and sequential runs both emit exactly the first `limit`
    /// combinations in enumeration order.
    #[must_use]
    pub const fn limit(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.limit = limit;
        self
    }

    /// Shards the CPU dimension across the current rayon thread pool.
    ///
    /// CPUs are scanned a chunk at a time, one CPU per worker thread, and each
    /// chunk is written to the sink before the next starts. Output order is
    /// the same as a sequential run.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Uses an externally controlled stop signal.
    #[must_use]
    pub fn stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Reports progress to an observer.
    #[must_use]
    pub fn progress(mut self, progress: &'e dyn Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Enumerates every compatible combination into `sink`.
    ///
    /// # Errors
    ///
    /// Returns the sink's error if it fails to accept a combination. Bad
    /// component data never causes an error; it only rejects tuples.
    #[instrument(level = "debug", skip_all, fields(parallel = self.parallel))]
    pub fn run<S: Sink<'c>>(&self, sink: &mut S) -> Result<Summary, S::Error> {
        let catalog = self.engine.catalog();
        let total = u64::try_from(catalog.combinations()).unwrap_or(u64::MAX);
        debug!(
            cpus = catalog.cpus.len(),
            ram = catalog.ram.len(),
            motherboards = catalog.motherboards.len(),
            ssds = catalog.ssds.len(),
            total,
            "enumerating"
        );

        self.progress.start(total);
        let result = if self.parallel {
            self.run_parallel(sink)
        } else {
            self.run_sequential(sink)
        };
        self.progress.finish();

        let Coverage {
            examined,
            accepted,
            stopped_early,
        } = result?;
        let summary = Summary {
            examined,
            accepted: accepted as u64,
            stopped_early,
            cache: self.engine.stats(),
        };
        info!(
            examined,
            accepted,
            stopped_early,
            cache_entries = summary.cache.entries,
            cache_hits = summary.cache.hits,
            "enumeration finished"
        );
        Ok(summary)
    }

    fn run_sequential<S: Sink<'c>>(&self, sink: &mut S) -> Result<Coverage, S::Error> {
        let catalog = self.engine.catalog();
        let per_cpu = self.tuples_per_cpu();
        let limit = self.limit.map(NonZeroUsize::get);
        let mut coverage = Coverage::default();

        for cpu in catalog.cpus.ids() {
            if self.stop.is_stopped() {
                debug!("stop signal raised");
                coverage.stopped_early = true;
                return Ok(coverage);
            }

            let flow = self.scan_cpu(cpu, |offset, combination| {
                if let Err(e) = sink.accept(combination) {
                    return ControlFlow::Break(Err(e));
                }
                coverage.accepted += 1;
                if limit.is_some_and(|limit| coverage.accepted >= limit) {
                    return ControlFlow::Break(Ok(offset + 1));
                }
                ControlFlow::Continue(())
            });

            if let ControlFlow::Break(outcome) = flow {
                let covered = outcome?;
                self.progress.advance(covered);
                return Ok(self.limit_reached(coverage, covered));
            }

            coverage.examined += per_cpu;
            self.progress.advance(per_cpu);
        }

        Ok(coverage)
    }

    /// Scans CPUs in chunks of one per worker thread, writing each chunk in
    /// enumeration order before the next one starts.
    fn run_parallel<S: Sink<'c>>(&self, sink: &mut S) -> Result<Coverage, S::Error> {
        let catalog = self.engine.catalog();
        let per_cpu = self.tuples_per_cpu();
        let limit = self.limit.map(NonZeroUsize::get);
        let chunk_size = rayon::current_num_threads().max(1);
        let cpus: Vec<Id<Cpu>> = catalog.cpus.ids().collect();
        let mut coverage = Coverage::default();

        for chunk in cpus.chunks(chunk_size) {
            if self.stop.is_stopped() {
                debug!("stop signal raised");
                coverage.stopped_early = true;
                return Ok(coverage);
            }

            let shards: Vec<Vec<(u64, AcceptedCombination<'c>)>> = chunk
                .par_iter()
                .map(|&cpu| {
                    let mut shard = Vec::new();
                    let _ = self.scan_cpu(cpu, |offset, combination| {
                        shard.push((offset, combination));
                        ControlFlow::<Infallible>::Continue(())
                    });
                    self.progress.advance(per_cpu);
                    shard
                })
                .collect();

            for shard in shards {
                for (offset, combination) in shard {
                    sink.accept(combination)?;
                    coverage.accepted += 1;
                    if limit.is_some_and(|limit| coverage.accepted >= limit) {
                        return Ok(self.limit_reached(coverage, offset + 1));
                    }
                }
                coverage.examined += per_cpu;
            }
        }

        Ok(coverage)
    }

    /// Finishes a run cut short by the limit, `covered` tuples into the
    /// current CPU.
    fn limit_reached(&self, mut coverage: Coverage, covered: u64) -> Coverage {
        coverage.examined += covered;
        let total = self.engine.catalog().combinations();
        coverage.stopped_early = u128::from(coverage.examined) < total;
        debug!(
            accepted = coverage.accepted,
            examined = coverage.examined,
            "limit reached"
        );
        coverage
    }

    /// Visits the accepted combinations for one CPU, in enumeration order.
    ///
    /// Each combination is passed with its offset among the CPU's tuples.
    fn scan_cpu<B>(
        &self,
        cpu: Id<Cpu>,
        mut visit: impl FnMut(u64, AcceptedCombination<'c>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let engine = self.engine;
        let catalog = engine.catalog();
        let boards_len = catalog.motherboards.len() as u64;
        let ssds_len = catalog.ssds.len() as u64;

        let Some(cpu_name) = catalog.cpus.name(cpu) else {
            return ControlFlow::Continue(());
        };

        let rams = catalog.ram.ids().zip(catalog.ram.iter().map(|(n, _)| n));
        for (ram_offset, (ram, ram_name)) in (0u64..).zip(rams) {
            if !engine.cpu_ram(cpu, ram) {
                continue;
            }
            let boards = catalog
                .motherboards
                .ids()
                .zip(catalog.motherboards.iter().map(|(n, _)| n));
            for (board_offset, (board, board_name)) in (0u64..).zip(boards) {
                if !engine.cpu_motherboard(cpu, board) {
                    continue;
                }
                let ssds = catalog.ssds.ids().zip(catalog.ssds.iter().map(|(n, _)| n));
                for (ssd_offset, (ssd, ssd_name)) in (0u64..).zip(ssds) {
                    let compatible = engine.cpu_ssd(cpu, board, ssd)
                        && engine.ram_motherboard(ram, board)
                        && engine.ram_ssd(ram, board, ssd)
                        && engine.motherboard_ssd(board, ssd);
                    if compatible {
                        let offset =
                            (ram_offset * boards_len + board_offset) * ssds_len + ssd_offset;
                        visit(
                            offset,
                            AcceptedCombination {
                                cpu: cpu_name,
                                ram: ram_name,
                                motherboard: board_name,
                                ssd: ssd_name,
                            },
                        )?;
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn tuples_per_cpu(&self) -> u64 {
        let catalog = self.engine.catalog();
        [catalog.ram.len(), catalog.motherboards.len(), catalog.ssds.len()]
            .into_iter()
            .map(|n| n as u64)
            .product()
    }
}
