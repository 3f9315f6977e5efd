//! # Analysis Benchmarks
//!
//! Performance benchmarks for the wattwise-core pipeline.
//!
//! Run with: `cargo bench -p wattwise-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wattwise_core::{Analysis, MachineRecord, Policy, Validator, parse_csv, parse_json};

/// Build a fleet where every third machine is inefficient.
fn create_fleet(size: usize) -> Vec<MachineRecord> {
    (0..size)
        .map(|i| {
            let power = 40.0 + (i % 70) as f64;
            let hours = if i % 3 == 0 { 12.0 } else { 4.0 };
            MachineRecord::new(format!("M{:05}", i), power, hours).expect("record")
        })
        .collect()
}

fn fleet_csv(size: usize) -> String {
    let mut csv = String::from("machine_id,power_usage_kw,operational_hours\n");
    for record in create_fleet(size) {
        csv.push_str(&format!(
            "{},{},{}\n",
            record.machine_id(),
            record.power_usage_kw(),
            record.operational_hours()
        ));
    }
    csv
}

fn fleet_json(size: usize) -> String {
    let machines: Vec<_> = create_fleet(size)
        .iter()
        .map(|r| {
            format!(
                r#"{{"machine_id":"{}","power_usage_kw":{},"operational_hours":{}}}"#,
                r.machine_id(),
                r.power_usage_kw(),
                r.operational_hours()
            )
        })
        .collect();
    format!(r#"{{"machines":[{}]}}"#, machines.join(","))
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");

    for size in [100, 1000, 10000].iter() {
        let fleet = create_fleet(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &fleet, |b, fleet| {
            b.iter(|| black_box(Validator::validate(fleet)));
        });
    }

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    for size in [100, 1000, 10000].iter() {
        let fleet = create_fleet(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &fleet, |b, fleet| {
            b.iter(|| black_box(Analysis::run(fleet.clone(), Policy::default())));
        });
    }

    group.finish();
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let csv = fleet_csv(1000);
    let json = fleet_json(1000);

    group.bench_function("csv_1000", |b| {
        b.iter(|| black_box(parse_csv(&csv).expect("parse")));
    });
    group.bench_function("json_1000", |b| {
        b.iter(|| black_box(parse_json(&json).expect("parse")));
    });

    group.finish();
}

criterion_group!(benches, bench_validation, bench_analysis, bench_parsing);
criterion_main!(benches);
