//! Benchmarks for tag compilation and validation
//!
//! - cold compiles (parse + compile, no cache)
//! - cached compiles through an engine
//! - validator execution on passing and failing input
//! - struct walks

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use verity::{Compiler, Engine, Field, StructValue, ToValue, Value, parse_tag};

const TAGS: &[&str] = &[
    "string;min=3;max=10",
    "string;regex=^[a-z0-9_]{3,16}$",
    "slice;min=1;foreach=(string;min=2)",
    "slice;foreach=(slice;max=4;foreach=(int;min=0;max=100))",
];

// ============================================================================
// COMPILATION
// ============================================================================

fn bench_cold_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_compile");
    let compiler = Compiler::new();

    for tag in TAGS {
        group.bench_with_input(BenchmarkId::from_parameter(tag), tag, |b, tag| {
            b.iter(|| {
                let rules = parse_tag(black_box(tag)).unwrap_or_default();
                compiler.compile(&rules)
            });
        });
    }

    group.finish();
}

fn bench_cached_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_compile");
    let engine = Engine::new();

    for tag in TAGS {
        group.bench_with_input(BenchmarkId::from_parameter(tag), tag, |b, tag| {
            b.iter(|| engine.from_tag(black_box(tag)));
        });
    }

    group.finish();
}

// ============================================================================
// EXECUTION
// ============================================================================

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let engine = Engine::new();

    if let Ok(v) = engine.from_tag("string;min=3;max=10") {
        let ok = "hello".to_value();
        let bad = "hi".to_value();
        group.bench_function("string_valid", |b| b.iter(|| v.validate_value(black_box(&ok))));
        group.bench_function("string_invalid", |b| b.iter(|| v.validate_value(black_box(&bad))));
    }

    if let Ok(v) = engine.from_tag("slice;foreach=(string;min=2)") {
        let items: Vec<String> = (0..100).map(|i| format!("item-{i}")).collect();
        let items = items.to_value();
        group.bench_function("slice_100", |b| b.iter(|| v.validate_value(black_box(&items))));
    }

    group.finish();
}

fn user(i: usize) -> Value {
    Value::Struct(StructValue::new("User", vec![
        Field::new("Name", format!("user-{i}").to_value()).with_tag("string;min=3;max=32"),
        Field::new("Age", (18 + i % 50).to_value()).with_tag("int;min=18"),
    ]))
}

fn bench_struct_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("struct_walk");
    let engine = Engine::new();

    for size in [1, 10, 100] {
        let team = Value::Struct(StructValue::new("Team", vec![Field::new(
            "Members",
            Value::Seq((0..size).map(user).collect()),
        )]));
        group.bench_with_input(BenchmarkId::from_parameter(size), &team, |b, team| {
            b.iter(|| engine.validate_struct(black_box(team)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cold_compile,
    bench_cached_compile,
    bench_validate,
    bench_struct_walk
);
criterion_main!(benches);
