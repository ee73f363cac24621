// ============================================================================
// Decimal Chain Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Decomposition - f64 to mantissa/scale, integral and fractional inputs
// 2. Operators - One binary step per operation
// 3. Chains - Left folds of increasing length
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use decimal_chain::prelude::*;
use std::hint::black_box;

// ============================================================================
// Decomposition Benchmarks
// ============================================================================

fn benchmark_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");

    for (label, value) in [("integer", 123_456.0), ("fraction", 0.123_456), ("tiny", 1.5e-12)] {
        group.bench_with_input(BenchmarkId::new("f64", label), &value, |b, value| {
            b.iter(|| black_box(DecimalValue::decompose(black_box(*value))))
        });
    }

    group.finish();
}

// ============================================================================
// Operator Benchmarks
// ============================================================================

fn benchmark_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");
    let engine = OperatorEngine::default();
    let lhs = Operand::from(19.99);
    let rhs = Operand::from(0.07);

    for operation in Operation::ALL {
        group.bench_with_input(
            BenchmarkId::new("evaluate", operation),
            &operation,
            |b, operation| b.iter(|| black_box(engine.evaluate(&lhs, &rhs, *operation))),
        );
    }

    let percent = Operand::Percent(12.5);
    group.bench_function("percent_multiply", |b| {
        b.iter(|| black_box(engine.evaluate(&percent, &lhs, Operation::Multiply)))
    });

    group.finish();
}

// ============================================================================
// Chain Benchmarks
// ============================================================================

fn benchmark_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("chains");

    for length in [2_usize, 8, 64] {
        let operands: Vec<Operand> = (0..length)
            .map(|i| Operand::from(0.1 * (i % 7 + 1) as f64))
            .collect();

        group.bench_with_input(BenchmarkId::new("add", length), &operands, |b, operands| {
            b.iter(|| black_box(compute_chain(operands, Operation::Add)))
        });

        group.bench_with_input(
            BenchmarkId::new("multiply_fold", length),
            &operands,
            |b, operands| {
                b.iter(|| {
                    let mut chain = Chain::default();
                    chain.seed(1);
                    for operand in operands {
                        black_box(chain.multiply([*operand]).ok());
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_decompose,
    benchmark_operators,
    benchmark_chains
);
criterion_main!(benches);
