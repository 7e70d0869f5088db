//! Constrained read throughput: full-array copy vs strided hyperslab vs
//! repeated reads that hit the snapshot.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use slabcache::{ArrayCache, Dimension, TypedArrayCache};

const N: usize = 512;

fn cube() -> TypedArrayCache<f32> {
    let mut arr = TypedArrayCache::from_values(
        "cube",
        vec![Dimension::new(8, "t"), Dimension::new(N, "y"), Dimension::new(N, "x")],
        (0..8 * N * N).map(|v| v as f32).collect(),
    );
    arr.set_validate_bounds(false);
    arr
}

fn bench_gather(c: &mut Criterion) {
    let mut group = c.benchmark_group("gather");

    group.bench_function("unconstrained", |b| {
        let mut arr = cube();
        b.iter(|| {
            arr.set_last_used_constraints(None);
            arr.read().unwrap();
            black_box(arr.constrained_values().len());
        })
    });

    group.bench_function("strided_hyperslab", |b| {
        let mut arr = cube();
        arr.add_constraint(0, 2, 3, 7).unwrap();
        arr.add_constraint(1, 0, 4, N - 1).unwrap();
        arr.add_constraint(2, 1, 2, N - 1).unwrap();
        b.iter(|| {
            arr.set_last_used_constraints(None);
            arr.read().unwrap();
            black_box(arr.constrained_values().len());
        })
    });

    group.bench_function("snapshot_hit", |b| {
        let mut arr = cube();
        arr.add_constraint(0, 0, 1, 0).unwrap();
        arr.read().unwrap();
        b.iter(|| {
            arr.read().unwrap();
            black_box(arr.is_valid());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_gather);
criterion_main!(benches);
