//! Benchmarks for the greedy, row-weighting and large-neighborhood-search
//! algorithms, on cycle graphs of varying sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stablesolver::clique;
use stablesolver::graph::{DuplicatePolicy, Graph, GraphBuilder};
use stablesolver::stable::{self, greedy};
use stablesolver::time::Timer;
use stablesolver::{Output, Parameters};
use std::time::Duration;

fn cycle(n: usize) -> Graph {
    let mut b = GraphBuilder::new();
    b.add_vertices(n);
    b.set_unweighted();
    for i in 0..n {
        b.add_edge(i, (i + 1) % n, DuplicatePolicy::Ignore).unwrap();
    }
    b.build().unwrap()
}

/// Benchmark every MWIS greedy constructor on cycles of varying sizes.
fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("StableGreedy");

    for n in [16, 64, 256, 1024].iter() {
        let g = cycle(*n);

        group.bench_with_input(BenchmarkId::new("gwmin", n), n, |b, _| {
            b.iter(|| greedy::gwmin(black_box(&g)))
        });
        group.bench_with_input(BenchmarkId::new("gwmax", n), n, |b, _| {
            b.iter(|| greedy::gwmax(black_box(&g)))
        });
        group.bench_with_input(BenchmarkId::new("gwmin2", n), n, |b, _| {
            b.iter(|| greedy::gwmin2(black_box(&g)))
        });
        group.bench_with_input(BenchmarkId::new("strong", n), n, |b, _| {
            b.iter(|| greedy::strong_greedy(black_box(&g)))
        });
    }

    group.finish();
}

/// Benchmark row-weighting v1/v2 under a fixed iteration budget.
fn bench_row_weighting(c: &mut Criterion) {
    let mut group = c.benchmark_group("StableRowWeighting");

    for n in [16, 64, 256].iter() {
        let g = cycle(*n);
        let params = Parameters {
            maximum_number_of_iterations: Some(2_000),
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::new("v1", n), n, |b, _| {
            b.iter(|| {
                let output = Output::new(Timer::new(Some(Duration::from_secs(5))));
                stable::solve(
                    stable::Algorithm::LocalSearchRowWeighting1,
                    black_box(&g),
                    &output,
                    &params,
                    1,
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("v2", n), n, |b, _| {
            b.iter(|| {
                let output = Output::new(Timer::new(Some(Duration::from_secs(5))));
                stable::solve(
                    stable::Algorithm::LocalSearchRowWeighting2,
                    black_box(&g),
                    &output,
                    &params,
                    1,
                )
            })
        });
    }

    group.finish();
}

/// Benchmark large-neighborhood search under a fixed iteration budget.
fn bench_large_neighborhood_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("StableLargeNeighborhoodSearch");

    for n in [16, 64, 256].iter() {
        let g = cycle(*n);
        let params = Parameters {
            maximum_number_of_iterations: Some(2_000),
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::new("lns", n), n, |b, _| {
            b.iter(|| {
                let output = Output::new(Timer::new(Some(Duration::from_secs(5))));
                stable::solve(
                    stable::Algorithm::LargeNeighborhoodSearch,
                    black_box(&g),
                    &output,
                    &params,
                    1,
                )
            })
        });
    }

    group.finish();
}

/// Benchmark the MWC greedy constructors on the same cycle family.
fn bench_clique_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("CliqueGreedy");

    for n in [16, 64, 256].iter() {
        let g = cycle(*n);

        group.bench_with_input(BenchmarkId::new("gwmin", n), n, |b, _| {
            b.iter(|| clique::greedy::gwmin(black_box(&g)))
        });
        group.bench_with_input(BenchmarkId::new("strong", n), n, |b, _| {
            b.iter(|| clique::greedy::strong_greedy(black_box(&g)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_greedy,
    bench_row_weighting,
    bench_large_neighborhood_search,
    bench_clique_greedy,
);

criterion_main!(benches);
