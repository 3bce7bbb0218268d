//! This bench test simulates importing a large file of runs in a random date
//! order, which re-sorts the collection after every insertion.

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use runlog::{storage::import_str, RunCollection, RunDate, RunRecordParser};

/// Generates `count` lines with dates scattered across several years
fn generate_lines(count: usize) -> String {
    (0..count)
        .map(|i| {
            let year = 2015 + (i * 7) % 10;
            let month = 1 + (i * 5) % 12;
            let day = 1 + (i * 11) % 28;
            let minutes = 20 + i % 40;
            format!("{},0:{minutes:02}:{:02},{year}/{month}/{day}\n", 1 + i % 13, i % 60)
        })
        .collect()
}

fn import_many(c: &mut Criterion) {
    let parser = RunRecordParser::new(RunDate::new(2024, 1, 1).unwrap());
    let content = generate_lines(1_000);

    c.bench_function("import 1000 runs", |b| {
        b.iter_batched(
            RunCollection::new,
            |mut collection| {
                import_str(&content, &mut collection, &parser).unwrap();
                collection
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, import_many);
criterion_main!(benches);
