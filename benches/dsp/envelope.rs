//! Benchmarks for the amplitude and filter envelopes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_acid::dsp::envelope::{AnalogEnvelope, DecayEnvelope};

use crate::BLOCK_SIZES;

fn fill(buffer: &mut [f32], mut next: impl FnMut() -> f32) {
    for sample in buffer.iter_mut() {
        *sample = next();
    }
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Decay phase (amp envelope after the attack)
        let mut env = AnalogEnvelope::new(48_000.0, 0.0, 1.23, 0.0, 0.003);
        env.note_on();
        group.bench_with_input(BenchmarkId::new("amp_decay", size), &size, |b, _| {
            b.iter(|| fill(black_box(&mut buffer), || env.next_sample()))
        });

        // Release phase
        let mut env = AnalogEnvelope::new(48_000.0, 0.0, 1.23, 1.0, 0.5);
        env.note_on();
        for _ in 0..200 {
            env.next_sample();
        }
        env.note_off();
        group.bench_with_input(BenchmarkId::new("amp_release", size), &size, |b, _| {
            b.iter(|| fill(black_box(&mut buffer), || env.next_sample()))
        });

        // Filter envelope, retriggered every block like a fast 16th-note line
        let mut filter_env = DecayEnvelope::new(48_000.0, 0.2);
        group.bench_with_input(BenchmarkId::new("filter_decay", size), &size, |b, _| {
            b.iter(|| {
                filter_env.trigger();
                fill(black_box(&mut buffer), || filter_env.next_sample())
            })
        });
    }

    group.finish();
}
