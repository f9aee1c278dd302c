//! Benchmark for full cave generation.
//!
//! Run with: cargo bench --package cavern --bench generate_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cavern::{CaveGenerator, GenerationConfig, MapConfig, MapSeed};

fn config(width: i32, height: i32) -> GenerationConfig {
    GenerationConfig {
        map: MapConfig::new(width, height, 47, MapSeed::new(42)),
        cell_size: 1.0,
    }
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let mut generator = CaveGenerator::new();

    let mut group = c.benchmark_group("generate");
    for (width, height) in [(72, 48), (128, 128), (256, 256)] {
        group.throughput(Throughput::Elements(u64::try_from(width * height).unwrap()));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &config(width, height),
            |b, config| {
                b.iter(|| black_box(generator.generate(config).unwrap()));
            },
        );
    }
    group.finish();
}

fn benchmark_mesh_only(c: &mut Criterion) {
    let map = cavern::generate_map(&config(128, 128).map).unwrap();

    c.bench_function("build_mesh_128x128", |b| {
        b.iter(|| black_box(cavern::build_mesh(&map.grid, 1.0)));
    });
}

criterion_group!(benches, benchmark_full_pipeline, benchmark_mesh_only);
criterion_main!(benches);
