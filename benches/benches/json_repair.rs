//! Benchmarks for the JSON repair engine in gateway/src/structured/repair
//!
//! Performance-critical paths:
//! - `repair` fast path on already valid documents
//! - Structural passes on documents with a single defect
//! - Truncation recovery on documents cut off mid-member

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::fmt::Write;
use wayfarer_gateway::structured::repair;

/// Builds an itinerary document with `days` entries of a few stops each.
fn itinerary(days: usize) -> String {
    let mut out = String::from(r#"{"title":"Coastal Portugal","days":["#);
    for day in 1..=days {
        if day > 1 {
            out.push(',');
        }
        let _ = write!(
            out,
            r#"{{"day":{day},"city":"Porto","stops":[{{"name":"Livraria Lello","minutes":45}},{{"name":"Ribeira","note":"Try the \"francesinha\", it's huge"}}]}}"#
        );
    }
    out.push_str("]}");
    out
}

fn bench_valid_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_repair/valid");

    for days in [1, 10, 100] {
        let doc = itinerary(days);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &doc, |b, d| {
            b.iter(|| repair(black_box(d)));
        });
    }

    group.finish();
}

fn bench_single_defects(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_repair/defects");

    let doc = itinerary(10);
    let unclosed = doc[..doc.len() - 2].to_string();
    let trailing_comma = format!("{},]}}", &doc[..doc.len() - 2]);
    let glued = doc.replace("},{\"day\"", "}{\"day\"");

    let cases = [
        ("unclosed", unclosed),
        ("trailing_comma", trailing_comma),
        ("missing_commas", glued),
    ];

    for (name, text) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(*name), text, |b, t| {
            b.iter(|| repair(black_box(t)));
        });
    }

    group.finish();
}

fn bench_truncation(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_repair/truncation");

    let doc = itinerary(50);
    for fraction in [25, 50, 90] {
        let cut = doc.len() * fraction / 100;
        let cut = (0..=cut).rev().find(|&i| doc.is_char_boundary(i)).unwrap_or(0);
        let text = doc[..cut].to_string();
        group.bench_with_input(BenchmarkId::from_parameter(fraction), &text, |b, t| {
            b.iter(|| repair(black_box(t)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_valid_documents,
    bench_single_defects,
    bench_truncation
);
criterion_main!(benches);
