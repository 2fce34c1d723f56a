//! Benchmarks for normalization and typed parsing of generation output
//!
//! Performance-critical paths:
//! - `normalize`: fence extraction and control character stripping
//! - `parse_structured`: normalize + strict parse + repair into a typed value

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use serde::Deserialize;
use wayfarer_gateway::structured::{normalize, parse_structured};

#[derive(Debug, Deserialize)]
pub struct Stop {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Day {
    pub day: u32,
    pub stops: Vec<Stop>,
}

#[derive(Debug, Deserialize)]
pub struct Itinerary {
    pub days: Vec<Day>,
}

fn days_json(days: u32) -> String {
    let items: Vec<String> = (1..=days)
        .map(|d| format!(r#"{{"day":{d},"stops":[{{"name":"Stop {d}a"}},{{"name":"Stop {d}b"}}]}}"#))
        .collect();
    format!(r#"{{"days":[{}]}}"#, items.join(","))
}

fn samples() -> Vec<(&'static str, String)> {
    let doc = days_json(20);
    vec![
        ("bare", doc.clone()),
        ("fenced", format!("Here is the plan:\n```json\n{doc}\n```\nEnjoy!")),
        ("fenced_truncated", format!("```json\n{}", &doc[..doc.len() - 3])),
        ("prose_prefix", format!("Certainly! {doc}")),
    ]
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("structured/normalize");

    for (name, raw) in samples() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &raw, |b, r| {
            b.iter(|| normalize(black_box(r)));
        });
    }

    group.finish();
}

fn bench_parse_structured(c: &mut Criterion) {
    let mut group = c.benchmark_group("structured/parse");

    for (name, raw) in samples() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &raw, |b, r| {
            b.iter(|| parse_structured::<Itinerary>(black_box(r)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_parse_structured);
criterion_main!(benches);
