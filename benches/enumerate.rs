//! Enumerates a synthetic catalog whose parts are mostly, but not entirely,
//! compatible, so every relationship check and the verdict cache are
//! exercised.

#![allow(missing_docs)]

use compat::{Catalog, CompatibilityEngine, ComponentRecord, Enumerator};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

const SOCKETS: [&str; 2] = ["AM4", "AM5"];
const MEMORY: [&str; 2] = ["DDR4", "DDR5"];
const INTERFACES: [&str; 3] = ["NVMe", "SATA", "PCIe"];

fn synthetic_catalog(size: usize) -> Catalog {
    let mut catalog = Catalog::new();
    for i in 0..size {
        let memory = MEMORY[i % 2];
        catalog.cpus.insert_record(
            format!("cpu-{i}"),
            &ComponentRecord::new()
                .with("socket", SOCKETS[i % 2])
                .with("MemoryType", memory)
                .with("MaxRAMSpeed", format!("{memory}-{}", 3200 + (i % 4) * 400))
                .with("SupportedChipsets", "A520,B550,X570,B650"),
        );
        catalog.ram.insert_record(
            format!("ram-{i}"),
            &ComponentRecord::new()
                .with("type", memory)
                .with("speed", format!("{memory}-{}", 3000 + (i % 5) * 300)),
        );
        catalog.motherboards.insert_record(
            format!("board-{i}"),
            &ComponentRecord::new()
                .with("Socket", SOCKETS[i % 2])
                .with("Chipset", ["B550", "X570", "B650", "Z790"][i % 4])
                .with("MemoryType", MEMORY[(i / 2) % 2])
                .with("MaxRAMSpeed", format!("{memory}-4800"))
                .with("SupportedStorageInterfaces", "NVMe,SATA")
                .with("SupportedFormFactors", "M.2,2.5"),
        );
        catalog.ssds.insert_record(
            format!("ssd-{i}"),
            &ComponentRecord::new()
                .with("Interface", INTERFACES[i % 3])
                .with("FormFactor", ["M.2", "2.5"][i % 2]),
        );
    }
    catalog
}

fn enumerate(c: &mut Criterion) {
    let catalog = synthetic_catalog(24);
    let mut group = c.benchmark_group("enumerate");

    for (name, parallel) in [("sequential", false), ("parallel", true)] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || CompatibilityEngine::new(&catalog),
                |engine| {
                    let mut accepted = Vec::new();
                    Enumerator::new(&engine)
                        .parallel(parallel)
                        .run(&mut accepted)
                        .unwrap();
                    accepted.len()
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, enumerate);
criterion_main!(benches);
