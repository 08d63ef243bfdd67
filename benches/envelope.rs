//! Benchmarks for envelope formatting, the per-message hot path.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use udpstash::{format_envelope, local_hostname, timestamp_now};

fn bench_format_envelope(c: &mut Criterion) {
    let timestamp = timestamp_now();
    let host = local_hostname();
    c.bench_function("format_envelope", |b| {
        b.iter(|| {
            format_envelope(
                black_box(&timestamp),
                black_box("service started on port 8080"),
                black_box(&host),
            )
        })
    });
}

fn bench_timestamp_now(c: &mut Criterion) {
    c.bench_function("timestamp_now", |b| b.iter(timestamp_now));
}

criterion_group!(benches, bench_format_envelope, bench_timestamp_now);
criterion_main!(benches);
