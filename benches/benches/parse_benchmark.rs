//! Table parsing and output formatting benchmarks.
//!
//! Run with: `cargo bench --package dsefeed-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dsefeed_bench::latest_page;
use dsefeed_lib::prelude::*;
use dsefeed_lib::{TableSpec, parse_table_html};
use std::hint::black_box;
use std::io::sink;

/// Row counts around the size of the real latest-price page (~400 rows).
const ROW_COUNTS: [usize; 3] = [30, 400, 2_000];

fn parse_benchmark(c: &mut Criterion) {
    let spec = TableSpec::for_endpoint(Endpoint::Latest);
    let mut group = c.benchmark_group("parse");

    for rows in ROW_COUNTS {
        let html = latest_page(rows);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &html, |b, html| {
            b.iter(|| parse_table_html(black_box(html), &spec));
        });
    }

    group.finish();
}

fn format_benchmark(c: &mut Criterion) {
    let records = parse_table_html(
        &latest_page(400),
        &TableSpec::for_endpoint(Endpoint::Latest),
    )
    .unwrap_or_default();

    let mut group = c.benchmark_group("format");
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("table", |b| {
        b.iter(|| TableFormatter::new().write_records(black_box(&records), sink()));
    });
    group.bench_function("csv", |b| {
        b.iter(|| CsvFormatter::new().write_records(black_box(&records), sink()));
    });
    group.bench_function("json", |b| {
        b.iter(|| JsonFormatter::new().write_records(black_box(&records), sink()));
    });

    group.finish();
}

criterion_group!(benches, parse_benchmark, format_benchmark);
criterion_main!(benches);
