//! Benchmarks for depth-field computation
//!
//! Author: Moroya Sakamoto

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use depth_field::prelude::*;

/// Sphere of label 1 centred in an n^3 volume
fn sphere_volume(n: usize) -> Volume<i32> {
    let dims = Dims::new(n, n, n);
    let mut vol = Volume::filled(dims, Vec3::ONE, 0i32);
    let c = (n as f32 - 1.0) * 0.5;
    let r2 = (n as f32 * 0.4).powi(2);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let p = Vec3::new(x as f32, y as f32, z as f32) - Vec3::splat(c);
                if p.length_squared() <= r2 {
                    vol.set(x, y, z, 1);
                }
            }
        }
    }
    vol
}

/// n^3 volume tiled with 8^3 blocks of cycling labels
fn blocks_volume(n: usize) -> Volume<i32> {
    let dims = Dims::new(n, n, n);
    let mut vol = Volume::filled(dims, Vec3::new(1.0, 1.0, 2.5), 0i32);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let label = ((x / 8 + y / 8 + z / 8) % 5) as i32;
                vol.set(x, y, z, label);
            }
        }
    }
    vol
}

fn bench_line_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_kernel");

    for n in [64usize, 512, 4096] {
        let line: Vec<f32> = (0..n)
            .map(|i| if i % 37 == 0 { 0.0 } else { SENTINEL })
            .collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("squared_edt_1d", n), &line, |b, line| {
            b.iter(|| squared_edt_1d(black_box(line), 0.5))
        });
    }

    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("edt_strategies");
    group.sample_size(20);

    let n = 64;
    let volumes = [("sphere", sphere_volume(n)), ("blocks", blocks_volume(n))];
    group.throughput(Throughput::Elements((n * n * n) as u64));

    for (name, volume) in &volumes {
        for strategy in [EdtStrategyKind::LineSegmented, EdtStrategyKind::PerLabel] {
            let config = DistanceFieldConfig::default().with_strategy(strategy);
            let id = BenchmarkId::new(format!("{:?}", strategy), name);
            group.bench_with_input(id, volume, |b, volume| {
                b.iter(|| distance_field(black_box(volume), &config))
            });
        }
    }

    group.finish();
}

fn bench_parallel_vs_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("edt_threads");
    group.sample_size(20);

    let volume = blocks_volume(96);
    group.throughput(Throughput::Elements(volume.voxel_count() as u64));

    for parallel in [false, true] {
        let config = DistanceFieldConfig::default().with_parallel(parallel);
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| b.iter(|| distance_field(black_box(&volume), &config)));
    }

    group.finish();
}

fn bench_erosion(c: &mut Criterion) {
    let mut group = c.benchmark_group("erosion");
    group.sample_size(20);

    let labels = sphere_volume(64);
    let mask = Volume::from_vec(
        labels.dims,
        labels.spacing,
        labels.data.iter().map(|&l| l as u8).collect(),
    )
    .unwrap();
    group.throughput(Throughput::Elements(mask.voxel_count() as u64));

    group.bench_function("sphere_64", |b| b.iter(|| erosion_depth(black_box(&mask))));

    group.finish();
}

criterion_group!(
    benches,
    bench_line_kernel,
    bench_strategies,
    bench_parallel_vs_sequential,
    bench_erosion,
);

criterion_main!(benches);
