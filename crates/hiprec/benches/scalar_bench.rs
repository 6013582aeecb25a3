//! Benchmarks for arbitrary precision scalar arithmetic.
//!
//! Includes:
//! - Basic arithmetic at several precisions
//! - Transcendental functions
//! - Decimal formatting

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hiprec::float::{Notation, PrecFloat, Precision};

const PRECISIONS: [usize; 4] = [53, 256, 1024, 4096];

fn operands(bits: usize) -> (Precision, PrecFloat, PrecFloat) {
    let p = Precision::new(bits).unwrap();
    let a = p.pi();
    let b = p.from_i64(3).sqrt();
    (p, a, b)
}

/// Benchmark the four arithmetic operations.
fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    for bits in PRECISIONS {
        let (_, a, b) = operands(bits);

        group.bench_with_input(BenchmarkId::new("add", bits), &bits, |bench, _| {
            bench.iter(|| black_box(&a + &b))
        });
        group.bench_with_input(BenchmarkId::new("mul", bits), &bits, |bench, _| {
            bench.iter(|| black_box(&a * &b))
        });
        group.bench_with_input(BenchmarkId::new("div", bits), &bits, |bench, _| {
            bench.iter(|| black_box(&a / &b))
        });
    }

    group.finish();
}

/// Benchmark the functions the integrator evaluates per point.
fn bench_transcendental(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcendental");

    for bits in PRECISIONS {
        let (_, a, b) = operands(bits);

        group.bench_with_input(BenchmarkId::new("exp", bits), &bits, |bench, _| {
            bench.iter(|| black_box(a.exp()))
        });
        group.bench_with_input(BenchmarkId::new("ln", bits), &bits, |bench, _| {
            bench.iter(|| black_box(b.ln()))
        });
        group.bench_with_input(BenchmarkId::new("sinh_cosh", bits), &bits, |bench, _| {
            bench.iter(|| black_box(b.sinh_cosh()))
        });
        group.bench_with_input(BenchmarkId::new("sin_cos", bits), &bits, |bench, _| {
            bench.iter(|| black_box(a.sin_cos()))
        });
        group.bench_with_input(BenchmarkId::new("erfc", bits), &bits, |bench, _| {
            bench.iter(|| black_box(b.erfc()))
        });
    }

    group.finish();
}

/// Benchmark π, served from the per-thread cache after the first call.
fn bench_pi(c: &mut Criterion) {
    let mut group = c.benchmark_group("pi");

    for bits in [1024, 4096, 16384] {
        let p = Precision::new(bits).unwrap();
        group.bench_with_input(BenchmarkId::new("cached", bits), &bits, |bench, _| {
            bench.iter(|| black_box(p.pi()))
        });
    }

    group.finish();
}

/// Benchmark decimal output.
fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    for bits in [256, 1024] {
        let (p, a, _) = operands(bits);
        let digits = p.digits();
        group.bench_with_input(BenchmarkId::new("general", bits), &bits, |bench, _| {
            bench.iter(|| black_box(a.to_string_with(digits, Notation::General)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_arithmetic,
    bench_transcendental,
    bench_pi,
    bench_format
);
criterion_main!(benches);
