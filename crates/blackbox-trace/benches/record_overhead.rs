//! Measures the per-record cost of the trace log hot path.

use std::hint::black_box;

use blackbox_trace::{TraceArg, TraceBuffer, TraceLog};
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_record");

    group.bench_function("buffer_id_only", |b| {
        let mut buf: TraceBuffer<256> = TraceBuffer::new();
        b.iter(|| buf.record(black_box(0x20), &[]));
    });

    group.bench_function("buffer_two_args", |b| {
        let mut buf: TraceBuffer<256> = TraceBuffer::new();
        let args = [TraceArg::u32(0xdead_beef), TraceArg::u16(0x1234)];
        b.iter(|| buf.record(black_box(0x20), black_box(&args)));
    });

    group.bench_function("log_critical_section", |b| {
        let log: TraceLog<256> = TraceLog::new();
        let args = [TraceArg::u32(0xdead_beef)];
        b.iter(|| log.record(black_box(0x20), black_box(&args)));
    });

    group.finish();
}

criterion_group!(benches, bench_record);
criterion_main!(benches);
