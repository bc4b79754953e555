//! Benchmarks for the evolution engine and its operators.
//!
//! The generation loop is the hot path: every generation evaluates the whole
//! population and breeds a replacement.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use passcode_ga::ga::{mutate, run, single_point_crossover, GaConfig, Genome};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn bench_fitness(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    let target = Genome::random(&mut rng, 32);
    let candidate = Genome::random(&mut rng, 32);

    c.bench_function("fitness_32", |b| {
        b.iter(|| black_box(&candidate).fitness(black_box(&target)));
    });
}

fn bench_operators(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(2);
    let a = Genome::random(&mut rng, 32);
    let b = Genome::random(&mut rng, 32);

    c.bench_function("crossover_32", |bench| {
        bench.iter(|| single_point_crossover(black_box(&a), black_box(&b), &mut rng));
    });

    let mut genome = a.clone();
    c.bench_function("mutate_32", |bench| {
        bench.iter(|| mutate(black_box(&mut genome), 0.01, &mut rng));
    });
}

fn bench_full_run(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(3);
    let target = Genome::random(&mut rng, 32);
    let config = GaConfig::default();

    let mut group = c.benchmark_group("run");
    group.sample_size(10);
    group.bench_function("default_32bit", |b| {
        b.iter(|| {
            let mut run_rng = SmallRng::seed_from_u64(42);
            let result = run(black_box(&target), &config, "bench", &mut run_rng);
            black_box(result)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_fitness, bench_operators, bench_full_run);
criterion_main!(benches);
