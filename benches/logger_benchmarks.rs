//! Criterion benchmarks for cleanstack_logging

use cleanstack_logging::field::{self, Field};
use cleanstack_logging::logging::LoggerConfig;
use cleanstack_logging::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::time::Duration;

fn memory_logger(config: LoggerConfig) -> (FieldLogger, MemoryAppender) {
    let memory = MemoryAppender::new();
    let logger = config
        .build_with(Box::new(memory.clone()))
        .expect("Failed to build logger");
    (logger, memory)
}

// ============================================================================
// Field Construction Benchmarks
// ============================================================================

fn bench_field_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_construction");
    group.throughput(Throughput::Elements(1));

    group.bench_function("int64", |b| {
        b.iter(|| black_box(field::int64("count", black_box(42))));
    });

    group.bench_function("string", |b| {
        b.iter(|| black_box(field::string("user", black_box("alice"))));
    });

    group.bench_function("strings", |b| {
        let values = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        b.iter(|| black_box(field::strings("tags", values.clone())));
    });

    group.bench_function("any_struct", |b| {
        let value = serde_json::json!({"id": 7, "name": "widget"});
        b.iter(|| black_box(field::any("item", &value)));
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_sync_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_logging");
    group.throughput(Throughput::Elements(1));

    let (logger, memory) = memory_logger(LoggerConfig::production().with_level("debug"));

    group.bench_function("message_only", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"), &[]);
            memory.clear();
        });
    });

    group.bench_function("five_fields", |b| {
        b.iter(|| {
            logger.info(
                black_box("request"),
                &[
                    field::string("method", "GET"),
                    field::string("path", "/users"),
                    field::int("status", 200),
                    field::duration("latency", Duration::from_micros(1250)),
                    field::bool("cached", false),
                ],
            );
            memory.clear();
        });
    });

    let scoped = logger
        .named("http")
        .with(&[field::string("service", "users"), field::string("env", "bench")]);
    group.bench_function("derived_logger", |b| {
        b.iter(|| {
            scoped.info(black_box("request"), &[field::int("status", 200)]);
            memory.clear();
        });
    });

    group.finish();
}

fn bench_async_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("async_logging");
    group.throughput(Throughput::Elements(100));

    let config = LoggerConfig::production().with_async_buffer(10_000);
    let (logger, memory) = memory_logger(config);

    group.bench_function("hundred_then_sync", |b| {
        b.iter(|| {
            for i in 0..100 {
                logger.info("queued", &[field::int("i", i)]);
            }
            logger.sync().ok();
            memory.clear();
        });
    });

    group.finish();
}

// ============================================================================
// Derivation Benchmarks
// ============================================================================

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation");
    group.throughput(Throughput::Elements(1));

    let (logger, _memory) = memory_logger(LoggerConfig::production());
    let fields: Vec<Field> = (0..4).map(|i| field::int(format!("k{}", i), i)).collect();

    group.bench_function("with_four_fields", |b| {
        b.iter(|| black_box(logger.with(&fields)));
    });

    group.bench_function("named", |b| {
        b.iter(|| black_box(logger.named("component")));
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let (logger, _memory) = memory_logger(LoggerConfig::production().with_level("warn"));

    group.bench_function("filtered_structured", |b| {
        b.iter(|| {
            logger.debug(black_box("filtered"), &[field::int("n", 1)]);
        });
    });

    group.bench_function("filtered_formatted", |b| {
        b.iter(|| {
            logger.debugf(format_args!("filtered {}", black_box(1)));
        });
    });

    group.finish();
}

// ============================================================================
// Output Format Benchmarks
// ============================================================================

fn bench_output_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_formats");
    group.throughput(Throughput::Elements(1));

    let encoder = EncoderConfig::production();
    let mut fields = serde_json::Map::new();
    fields.insert("user".to_string(), serde_json::Value::from("alice"));
    fields.insert("age".to_string(), serde_json::Value::from(30));
    let entry = LogEntry::new(LogLevel::Info, "profile loaded")
        .with_logger_name(Some("svc.users".to_string()))
        .with_fields(fields);

    for format in [OutputFormat::Json, OutputFormat::Text, OutputFormat::Logfmt] {
        group.bench_function(format!("{:?}", format).to_lowercase(), |b| {
            b.iter(|| black_box(format.format(&entry, &encoder)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_field_construction,
    bench_sync_logging,
    bench_async_logging,
    bench_derivation,
    bench_level_filtering,
    bench_output_formats,
);
criterion_main!(benches);
