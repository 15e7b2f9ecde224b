use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use lookout::{diff, State};

const STATE_SIZE: u64 = 10_000;

fn numbered_state(offset: u64, value_offset: u64) -> State<u64> {
    (0..STATE_SIZE)
        .map(|i| (format!("key-{:08}", i + offset), i + value_offset))
        .collect()
}

fn bench_unchanged(c: &mut Criterion) {
    let previous = numbered_state(0, 0);
    let current = previous.clone();

    let mut group = c.benchmark_group("diff");
    group.throughput(Throughput::Elements(STATE_SIZE));
    group.bench_function("unchanged_10k", |b| {
        b.iter(|| diff(black_box(&previous), black_box(&current)));
    });
    group.finish();
}

fn bench_all_updated(c: &mut Criterion) {
    let previous = numbered_state(0, 0);
    let current = numbered_state(0, 1);

    let mut group = c.benchmark_group("diff");
    group.throughput(Throughput::Elements(STATE_SIZE));
    group.bench_function("all_updated_10k", |b| {
        b.iter(|| diff(black_box(&previous), black_box(&current)));
    });
    group.finish();
}

fn bench_disjoint(c: &mut Criterion) {
    // No shared keys: everything deleted, everything created.
    let previous = numbered_state(0, 0);
    let current = numbered_state(STATE_SIZE, 0);

    let mut group = c.benchmark_group("diff");
    group.throughput(Throughput::Elements(STATE_SIZE * 2));
    group.bench_function("disjoint_10k", |b| {
        b.iter(|| diff(black_box(&previous), black_box(&current)));
    });
    group.finish();
}

fn bench_first_fetch(c: &mut Criterion) {
    let previous = State::new();
    let current = numbered_state(0, 0);

    let mut group = c.benchmark_group("diff");
    group.throughput(Throughput::Elements(STATE_SIZE));
    group.bench_function("first_fetch_10k", |b| {
        b.iter(|| diff(black_box(&previous), black_box(&current)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_unchanged,
    bench_all_updated,
    bench_disjoint,
    bench_first_fetch
);
criterion_main!(benches);
