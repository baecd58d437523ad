//! Criterion benchmarks for precalculation and assembly.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use picalc_core::assembler::assemble_from_sequence;
use picalc_core::engine::precalculate;
use picalc_core::observers::NoOpObserver;
use picalc_core::precision::Precision;
use picalc_core::progress::CancellationToken;

fn bench_precalculate(c: &mut Criterion) {
    let cancel = CancellationToken::new();
    let observer = NoOpObserver::new();

    let mut group = c.benchmark_group("precalculate");
    for &n in &[10u64, 50, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| precalculate(n, &cancel, &observer).unwrap());
        });
    }
    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let s = precalculate(100, &CancellationToken::new(), &NoOpObserver::new()).unwrap();

    let mut group = c.benchmark_group("assemble");
    for &digits in &[100u64, 1_000, 10_000] {
        let precision = Precision::from_digits(digits).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(digits),
            &precision,
            |b, &precision| {
                b.iter(|| assemble_from_sequence(&s, precision).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_precalculate, bench_assemble);
criterion_main!(benches);
