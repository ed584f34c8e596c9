// ============================================================================
// Transition Pipeline Benchmark
// ============================================================================

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use odometer_engine::domain::OdometerConfig;
use odometer_engine::engine::build_matrix;
use odometer_engine::numeric::{isometric_pair, NumericValue};

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_fractional_text", |b| {
        b.iter(|| NumericValue::parse(black_box("123456.789")).unwrap())
    });
}

fn bench_normalize(c: &mut Criterion) {
    let cfg = OdometerConfig::default()
        .with_radix_mark(Some(','))
        .with_min_integers_length(9)
        .with_min_decimals_length(2);
    let old = NumericValue::parse(7).unwrap();
    let new = NumericValue::parse("123456.789").unwrap();

    c.bench_function("isometric_pair_grouped", |b| {
        b.iter(|| isometric_pair(black_box(&old), black_box(&new), &cfg))
    });
}

fn bench_matrix(c: &mut Criterion) {
    let cfg = OdometerConfig::default()
        .with_radix_mark(Some(','))
        .with_min_integers_length(9);
    let old = NumericValue::parse(999_999_999).unwrap();
    let new = NumericValue::parse(0).unwrap();
    let (old, new) = isometric_pair(&old, &new, &cfg);

    // Worst case: every digit spins, later columns carry many revolutions.
    c.bench_function("build_matrix_nine_wide_descent", |b| {
        b.iter(|| build_matrix(black_box(&old), black_box(&new), &cfg))
    });
}

criterion_group!(benches, bench_parse, bench_normalize, bench_matrix);
criterion_main!(benches);
