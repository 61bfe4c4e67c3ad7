//! Criterion micro-benchmarks for the five-point stencil.

use std::hint::black_box;

use calor_bench::local_fields;
use calor_grid::DoubleBuffer;
use calor_solver::{ftcs_update, update};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Benchmark: one stencil sweep over subdomains of increasing size.
fn bench_ftcs_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("ftcs_update");
    for side in [64u32, 128, 256] {
        let (cur, material) = local_fields(side, side).unwrap();
        let mut next = cur.clone();
        group.throughput(Throughput::Elements(u64::from(side) * u64::from(side)));
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter(|| {
                ftcs_update(black_box(&cur), black_box(&material), &mut next).unwrap();
                black_box(&next);
            });
        });
    }
    group.finish();
}

/// Benchmark: 100 update-and-swap steps on a 128×128 subdomain.
fn bench_double_buffer_100(c: &mut Criterion) {
    let (cur, material) = local_fields(128, 128).unwrap();
    c.bench_function("double_buffer_100_steps_128", |b| {
        b.iter(|| {
            let mut buffer = DoubleBuffer::new(cur.clone());
            for _ in 0..100 {
                update(&mut buffer, &material).unwrap();
                buffer.swap();
            }
            black_box(buffer.current().interior_sum());
        });
    });
}

criterion_group!(benches, bench_ftcs_update, bench_double_buffer_100);
criterion_main!(benches);
