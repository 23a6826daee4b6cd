//! Benchmarks for DSP primitives and the full voice.
//!
//! Run with: cargo bench
//!
//! Reference timing at 48kHz sample rate:
//!   - 32 samples  = 0.67ms deadline (one voice block)
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Primitives (wavetable oscillator, ladder filter, envelopes, table build)
//!   - scenarios/*  The acid voice driven by control frames

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications. All are whole voice blocks.
pub const BLOCK_SIZES: &[usize] = &[32, 64, 128, 256, 512];

criterion_group!(
    benches,
    dsp::bench_oscillator,
    dsp::bench_filter,
    dsp::bench_envelope,
    dsp::bench_wavetable,
    scenarios::bench_voice,
);
criterion_main!(benches);
