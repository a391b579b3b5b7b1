// ABOUTME: Criterion benchmarks for readiness scoring
// ABOUTME: Measures single check-in scoring, table comparison, and batch history scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! Criterion benchmarks for readiness scoring.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use trainwise_server::intelligence::{
    DeductionTable, EnergyLevel, MuscleSoreness, ReadinessCalculator, ReadinessInput, StressLevel,
};

#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn generate_check_ins(count: usize) -> Vec<ReadinessInput> {
    let today = Utc::now();
    (0..count)
        .map(|index| ReadinessInput {
            sleep_hours: 4.0 + ((index * 7) % 70) as f64 / 10.0,
            stress_level: match index % 3 {
                0 => StressLevel::Low,
                1 => StressLevel::Medium,
                _ => StressLevel::High,
            },
            muscle_soreness: match index % 4 {
                0 => MuscleSoreness::None,
                1 => MuscleSoreness::Mild,
                2 => MuscleSoreness::Moderate,
                _ => MuscleSoreness::Severe,
            },
            energy_level: match index % 3 {
                0 => EnergyLevel::High,
                1 => EnergyLevel::Medium,
                _ => EnergyLevel::Low,
            },
            date: today - Duration::days(index as i64),
        })
        .collect()
}

fn bench_single_score(c: &mut Criterion) {
    let input = generate_check_ins(1).remove(0);
    let mut group = c.benchmark_group("readiness_single");

    for (name, table) in [
        ("standard", DeductionTable::standard()),
        ("lenient", DeductionTable::lenient()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| ReadinessCalculator::score(black_box(&input), black_box(&table)));
        });
    }

    group.finish();
}

fn bench_history_scoring(c: &mut Criterion) {
    let table = DeductionTable::standard();
    let mut group = c.benchmark_group("readiness_history");

    for size in [30_usize, 365, 3650] {
        let inputs = generate_check_ins(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &inputs, |b, inputs| {
            b.iter(|| {
                inputs
                    .iter()
                    .map(|input| u32::from(ReadinessCalculator::score(input, &table).score))
                    .sum::<u32>()
            });
        });
    }

    group.finish();
}

fn bench_check_in_parsing(c: &mut Criterion) {
    let raw = r#"{"sleepHours":6.5,"stressLevel":"Moderate","muscleSoreness":"mild","energyLevel":"LOW"}"#;
    c.bench_function("readiness_parse_and_score", |b| {
        let table = DeductionTable::standard();
        b.iter(|| {
            let input: Option<ReadinessInput> = serde_json::from_str(black_box(raw)).ok();
            input.map(|i| ReadinessCalculator::score(&i, &table).score)
        });
    });
}

criterion_group!(
    benches,
    bench_single_score,
    bench_history_scoring,
    bench_check_in_parsing,
);
criterion_main!(benches);
