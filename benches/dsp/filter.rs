//! Benchmarks for the ladder filter and DC blocker.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_acid::dsp::filter::{DcBlocker, LadderFilter};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| if (i / 16) % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let mut buffer = input.clone();

        let mut ladder = LadderFilter::new(48_000.0);
        ladder.set_cutoff(800.0);
        ladder.set_resonance(0.7);

        group.bench_with_input(BenchmarkId::new("ladder_static", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                ladder.render(black_box(&mut buffer))
            })
        });

        // Envelope sweep: cutoff moves every sample, as in the voice
        let mut swept = LadderFilter::new(48_000.0);
        swept.set_resonance(0.7);

        group.bench_with_input(BenchmarkId::new("ladder_swept", size), &size, |b, _| {
            b.iter(|| {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    swept.set_cutoff(300.0 + 20.0 * i as f32);
                    *sample = swept.next_sample(input[i]);
                }
                black_box(&buffer);
            })
        });

        let mut dc = DcBlocker::new(48_000.0, 24.0);
        group.bench_with_input(BenchmarkId::new("dc_blocker", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = dc.next_sample(x);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
