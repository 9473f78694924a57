//! Append and materialization benchmarks.
//!
//! Per-append cost should stay flat as N grows; flatten cost should grow
//! with total bytes only.
//!
//! Run with:
//!   cargo bench --bench append

use std::hint::black_box;

use bytes::Bytes;
use bytetree_core::{Builder, FlattenConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const CHUNK: &[u8] = b"0123456789abcdef";

fn build_chain(n: usize) -> Builder {
    let mut builder = Builder::empty();
    for _ in 0..n {
        builder = builder.append(Bytes::from_static(CHUNK));
    }
    builder
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    for n in [1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_chain(n)));
        });
    }
    group.finish();
}

fn bench_naive_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("naive_concat");
    for n in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut acc: Vec<u8> = Vec::new();
                for _ in 0..n {
                    let mut next = Vec::with_capacity(acc.len() + CHUNK.len());
                    next.extend_from_slice(&acc);
                    next.extend_from_slice(CHUNK);
                    acc = next;
                }
                black_box(acc)
            });
        });
    }
    group.finish();
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");
    let n = 100_000usize;
    let builder = build_chain(n);
    group.throughput(Throughput::Bytes((n * CHUNK.len()) as u64));
    for (name, config) in [
        ("two-pass", FlattenConfig::two_pass()),
        ("streaming", FlattenConfig::streaming(0)),
        ("gather", FlattenConfig::gather()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(builder.to_bytes_with(&config)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_append, bench_naive_concat, bench_flatten);
criterion_main!(benches);
