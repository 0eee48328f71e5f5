// ============================================================================
// Decimal Evaluator Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Parsing - DecimalValue from text of growing length
// 2. Arithmetic - multiplication and long division on wide operands
// 3. Math - power and trigonometry
// 4. Full Evaluation - tokenize, reorder and evaluate whole expressions
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use decimal_evaluator::prelude::*;
use std::hint::black_box;

fn digits(len: usize, seed: u8) -> String {
    (0..len)
        .map(|i| char::from(b'1' + ((i as u8).wrapping_mul(7).wrapping_add(seed) % 9)))
        .collect()
}

fn wide_value(len: usize, seed: u8) -> DecimalValue {
    format!("{}.{}", digits(len, seed), digits(len / 2, seed + 3))
        .parse()
        .unwrap()
}

// ============================================================================
// Parsing
// ============================================================================

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for len in [10, 100, 1000].iter() {
        let text = format!("-{}.{}", digits(*len, 1), digits(*len, 2));
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| black_box(text.parse::<DecimalValue>().unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Arithmetic
// ============================================================================

fn benchmark_multiplication(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiplication");

    for len in [10, 50, 200].iter() {
        let a = wide_value(*len, 1);
        let b = wide_value(*len, 5);
        group.bench_with_input(BenchmarkId::from_parameter(len), &(a, b), |bench, (a, b)| {
            bench.iter(|| black_box(a * b));
        });
    }

    group.finish();
}

fn benchmark_division(c: &mut Criterion) {
    let mut group = c.benchmark_group("division");

    for len in [10, 50, 200].iter() {
        let a = wide_value(*len * 2, 2);
        let b = wide_value(*len, 4);
        group.bench_with_input(
            BenchmarkId::new("div_rem", len),
            &(a.clone(), b.clone()),
            |bench, (a, b)| {
                bench.iter(|| black_box(a.div_rem(b).unwrap()));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("divide_with_decimals", len),
            &(a, b),
            |bench, (a, b)| {
                bench.iter(|| black_box(math::divide_with_decimals(a, b, 30).unwrap()));
            },
        );
    }

    group.finish();
}

// ============================================================================
// Math Functions
// ============================================================================

fn benchmark_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("math");

    let base: DecimalValue = "1.0001".parse().unwrap();
    let exponent = DecimalValue::from(1000u32);
    group.bench_function("power_1000", |b| {
        b.iter(|| black_box(math::power(&base, &exponent, 10).unwrap()));
    });

    let factorial_arg = DecimalValue::from(100u32);
    group.bench_function("factorial_100", |b| {
        b.iter(|| black_box(math::factorial(&factorial_arg).unwrap()));
    });

    let angle: DecimalValue = "12.345".parse().unwrap();
    for places in [10i64, 30].iter() {
        group.bench_with_input(BenchmarkId::new("sine", places), places, |b, places| {
            b.iter(|| black_box(math::sine(&angle, *places, 30).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Full Evaluation
// ============================================================================

fn benchmark_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let evaluator = Evaluator::default();

    let expressions = [
        ("simple", "1 + 2 * 3".to_string()),
        ("nested", "((1 + 2) * (3 - 4) / 5) ^ 2 mod 7".to_string()),
        ("functions", "2sin(1) + cos(1) * abs(-3) - fact(10)".to_string()),
        (
            "long_chain",
            (1..=200).map(|i| i.to_string()).collect::<Vec<_>>().join(" + "),
        ),
    ];

    for (name, expression) in expressions.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(name), expression, |b, expr| {
            b.iter(|| black_box(evaluator.evaluate(expr).unwrap()));
        });
    }

    group.bench_function("tokenize_only", |b| {
        let expr = &expressions[2].1;
        b.iter(|| black_box(evaluator.tokenize(expr).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_multiplication,
    benchmark_division,
    benchmark_math,
    benchmark_evaluate
);

criterion_main!(benches);
