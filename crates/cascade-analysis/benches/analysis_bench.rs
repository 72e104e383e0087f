//! Criterion benchmarks for cascade-analysis components
//!
//! Run with: cargo bench -p cascade-analysis
#![allow(missing_docs)]

use cascade_analysis::{Fft, FrequencyResponse, capture_impulse_response};
use cascade_core::FilterChain;
use cascade_eq::{ChainCoefficients, ParamSnapshot, Slope};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f32 = 48000.0;

fn steep_chain() -> FilterChain {
    let mut snapshot = ParamSnapshot::default();
    snapshot.low_cut_frequency = 80.0;
    snapshot.low_cut_slope = Slope::Db48;
    snapshot.high_cut_frequency = 12000.0;
    snapshot.high_cut_slope = Slope::Db48;

    let mut chain = FilterChain::new();
    ChainCoefficients::from_snapshot(&snapshot, SAMPLE_RATE).apply(&mut chain);
    chain
}

fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT");

    for size in [1024, 4096, 16384] {
        let fft = Fft::new(size);
        let signal: Vec<f32> = (0..size).map(|i| (i as f32 * 0.01).sin()).collect();
        group.bench_with_input(BenchmarkId::new("forward", size), &signal, |b, signal| {
            b.iter(|| black_box(fft.forward(black_box(signal))));
        });
    }

    group.finish();
}

fn bench_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("Response");

    for len in [4096, 32768] {
        group.bench_with_input(BenchmarkId::new("impulse_to_response", len), &len, |b, &len| {
            let mut chain = steep_chain();
            b.iter(|| {
                let ir = capture_impulse_response(&mut chain, len);
                black_box(FrequencyResponse::from_impulse(&ir, SAMPLE_RATE))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fft, bench_response);
criterion_main!(benches);
