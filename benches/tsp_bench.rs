//! Criterion benchmarks for the u-tsp search engine.
//!
//! Uses seeded random instances to measure generation updates and the
//! GSX crossover independent of any input file.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use std::sync::Arc;
use u_tsp::ga::{GaConfig, Point, Population, SearchController, Solution};
use u_tsp::random::create_rng;

fn random_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = create_rng(seed);
    (0..n)
        .map(|i| {
            Point::new(
                format!("p{i}"),
                rng.random_range(0..1000),
                rng.random_range(0..1000),
            )
        })
        .collect()
}

fn bench_population_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("population_update");
    group.sample_size(10);

    for &n in &[20usize, 100, 500] {
        let points: Arc<[Point]> = random_points(n, 42).into();
        let config = GaConfig::default().with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            let mut rng = create_rng(42);
            let mut population = Population::new(Arc::clone(points), &config, &mut rng);
            b.iter(|| {
                population.update(&mut rng);
                black_box(population.best().distance())
            })
        });
    }
    group.finish();
}

fn bench_gsx_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("gsx_crossover");

    for &n in &[50usize, 500, 5000] {
        let points: Arc<[Point]> = random_points(n, 7).into();
        let mut rng = create_rng(7);
        let mut a = Solution::new(Arc::clone(&points));
        let mut b = Solution::new(points);
        a.randomize(&mut rng);
        b.randomize(&mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(a, b), |bench, (a, b)| {
            bench.iter(|| black_box(a.force_crossover_greedy(black_box(b), &mut rng)))
        });
    }
    group.finish();
}

fn bench_search_generations(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_50_generations");
    group.sample_size(10);

    for &n in &[20usize, 100] {
        let points = random_points(n, 3);
        let config = GaConfig::default().with_max_generations(50).with_seed(3);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(points, config),
            |b, (points, config)| {
                b.iter(|| {
                    let mut controller =
                        SearchController::new(points.clone(), config.clone()).expect("valid setup");
                    black_box(controller.run())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_population_update,
    bench_gsx_crossover,
    bench_search_generations
);
criterion_main!(benches);
