//! Cursor Smoothing Benchmarks
//!
//! Measures per-frame cost of both strategies and the buffer hot paths at
//! typical and jittery sample rates.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use remote_cursor::cursor::{
    LightweightSmoother, Predictor, PredictorConfig, Sample, SampleBuffer, SmootherConfig,
};

/// Generate a circular trace with deterministic arrival jitter
fn generate_trace(count: usize, interval_ms: i64) -> Vec<Sample> {
    (0..count)
        .map(|i| {
            let angle = i as f64 * 0.05;
            let jitter = ((i * 7) % 5) as i64 - 2;
            Sample::new(
                500.0 + 300.0 * angle.cos(),
                400.0 + 300.0 * angle.sin(),
                1000 + i as i64 * interval_ms + jitter,
            )
            .with_seq(i as u64 + 1)
        })
        .collect()
}

/// Benchmark buffer insertion (in-order and late arrivals)
fn bench_buffer_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_push");

    for capacity in [8usize, 20, 64] {
        let trace = generate_trace(256, 33);
        group.throughput(Throughput::Elements(trace.len() as u64));

        group.bench_with_input(BenchmarkId::new("capacity", capacity), &trace, |b, trace| {
            b.iter(|| {
                let mut buffer = SampleBuffer::new(capacity);
                for sample in trace {
                    black_box(buffer.push(*sample));
                }
                buffer.len()
            })
        });
    }

    group.finish();
}

/// Benchmark surrounding-window lookup
fn bench_buffer_surrounding(c: &mut Criterion) {
    let mut buffer = SampleBuffer::new(20);
    for sample in generate_trace(20, 33) {
        buffer.push(sample);
    }

    c.bench_function("buffer_surrounding", |b| {
        b.iter(|| black_box(buffer.surrounding(black_box(1300))))
    });
}

/// Benchmark one rendered frame per sample rate
fn bench_predictor_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("predictor_frame");

    // 30 Hz network updates, 60 Hz render
    for (name, interval_ms) in [("30hz", 33i64), ("10hz", 100), ("60hz", 16)] {
        let trace = generate_trace(120, interval_ms);

        group.bench_with_input(BenchmarkId::new("render", name), &trace, |b, trace| {
            b.iter(|| {
                let mut predictor = Predictor::new(PredictorConfig::default());
                let mut next = 0;
                let end = trace.last().map(|s| s.arrive_ms).unwrap_or(0);
                let mut now = 1000;
                while now <= end {
                    while next < trace.len() && trace[next].arrive_ms <= now {
                        predictor.push(trace[next]);
                        next += 1;
                    }
                    black_box(predictor.get_position(now));
                    now += 16;
                }
            })
        });
    }

    group.finish();
}

/// Benchmark the lightweight smoother over the same trace
fn bench_lightweight_frame(c: &mut Criterion) {
    let trace = generate_trace(120, 33);

    c.bench_function("lightweight_frame", |b| {
        b.iter(|| {
            let mut smoother = LightweightSmoother::new(SmootherConfig::default());
            for sample in &trace {
                smoother.update_target(sample.x, sample.y, sample.arrive_ms);
                black_box(smoother.tick(sample.arrive_ms + 8));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_buffer_push,
    bench_buffer_surrounding,
    bench_predictor_frame,
    bench_lightweight_frame
);
criterion_main!(benches);
