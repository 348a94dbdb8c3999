use std::hint::black_box;

use cadence_core::SurfaceSize;
use cadence_lanes::{Scene, SyntheticWorkload};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

fn bench_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("Synthetic Workload");
    let mut workload = SyntheticWorkload::new(42);

    // The cost curve should rise linearly with complexity.
    for complexity in [0u32, 1, 10, 50] {
        group.bench_with_input(
            BenchmarkId::from_parameter(complexity),
            &complexity,
            |b, &complexity| {
                b.iter(|| black_box(workload.run(complexity)));
            },
        );
    }

    group.finish();
}

fn bench_scene(c: &mut Criterion) {
    let mut scene = Scene::seeded(SurfaceSize::new(800, 600), 50, &mut Pcg64Mcg::seed_from_u64(1));

    c.bench_function("Scene advance (50 particles)", |b| {
        b.iter(|| {
            scene.advance(black_box(3.0));
        });
    });
}

criterion_group!(benches, bench_workload, bench_scene);
criterion_main!(benches);
