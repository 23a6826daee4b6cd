//! Benchmark for building the mip-mapped table (done once per voice, off the audio thread).

use std::hint::black_box;

use criterion::Criterion;
use saavy_acid::dsp::wavetable::{Heap, WaveTableBuilder};

pub fn bench_wavetable(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/wavetable");
    group.sample_size(20);

    let builder = WaveTableBuilder::square_303();
    group.bench_function("build_square_303", |b| {
        b.iter(|| black_box(builder.build(&Heap).expect("wavetable")))
    });

    group.finish();
}
