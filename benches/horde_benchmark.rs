//! Benchmarks for combat projection and the full search.
//!
//! The simulator is the hot path: every candidate of every generation runs
//! through it once.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;
use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use horde::combat::{ArchetypeId, Horde, Simulator};
use horde::{generate_horde, DamageTable, Discipline, Scenario};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn load_scenario() -> Scenario {
    Scenario::load(Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/azteka.json"))).unwrap()
}

fn bench_simulate(c: &mut Criterion) {
    let request = load_scenario().into_request();
    let path = request.map.full_path();
    let towers = request.map.project_towers(&request.towers);
    let ids: Vec<ArchetypeId> = (0..10).map(|i| ArchetypeId(i % request.catalog.len())).collect();
    let horde = Horde::scheduled(&ids, request.params.spacing_time);

    for (label, discipline) in [("event", Discipline::EventScheduled), ("stepwise", Discipline::Stepwise)] {
        let sim = Simulator::new(&request.catalog, &towers, &path, DamageTable::standard(), discipline);
        c.bench_function(&format!("simulate_10_{label}"), |b| {
            b.iter(|| black_box(sim.simulate(black_box(&horde))));
        });
    }
}

fn bench_generate(c: &mut Criterion) {
    let mut request = load_scenario().into_request();
    request.params.generations = 10;

    let mut group = c.benchmark_group("generate");
    group.sample_size(20);
    group.bench_function("azteka_10_generations", |b| {
        b.iter(|| {
            let mut rng = SmallRng::seed_from_u64(black_box(42));
            black_box(generate_horde(&request, &mut rng).unwrap())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_simulate, bench_generate);
criterion_main!(benches);
