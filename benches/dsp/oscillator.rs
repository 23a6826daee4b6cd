//! Benchmarks for the band-limited wavetable oscillator.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use saavy_acid::dsp::{
    oscillator::WaveTableOsc,
    wavetable::{Heap, WaveTableBuilder},
};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let table = Arc::new(
        WaveTableBuilder::square_303()
            .build(&Heap)
            .expect("wavetable"),
    );

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Low note: top mip level, every harmonic present
        let mut low = WaveTableOsc::new(48_000.0);
        low.set_tables(table.clone(), table.clone());
        low.set_blend(1.0);
        low.set_frequency(55.0);

        group.bench_with_input(BenchmarkId::new("square_55hz", size), &size, |b, _| {
            b.iter(|| low.render(black_box(&mut buffer)))
        });

        // Glide: the mip level is reselected every sample
        let mut glide = WaveTableOsc::new(48_000.0);
        glide.set_tables(table.clone(), table.clone());
        glide.set_blend(1.0);

        group.bench_with_input(BenchmarkId::new("square_glide", size), &size, |b, _| {
            b.iter(|| {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    glide.set_frequency(55.0 + i as f32);
                    *sample = glide.next_sample();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
