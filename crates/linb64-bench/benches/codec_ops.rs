//! Criterion micro-benchmarks for encode and decode through the bridge.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use linb64_bench::{payload, warm_bridge, PAYLOAD_SIZES};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Benchmark: bytes → text at each payload size.
fn bench_encode(c: &mut Criterion) {
    init_tracing();
    let mut group = c.benchmark_group("codec_encode");
    for &len in &PAYLOAD_SIZES {
        let bytes = payload(len, 42);
        let mut bridge = warm_bridge(len).unwrap();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &bytes, |b, bytes| {
            b.iter(|| black_box(bridge.from_bytes(bytes).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: text → bytes at each payload size.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_decode");
    for &len in &PAYLOAD_SIZES {
        let mut bridge = warm_bridge(len).unwrap();
        let text = bridge.from_bytes(&payload(len, 42)).unwrap();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| black_box(bridge.to_bytes(text).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
