//! Benchmarks for the complete acid voice.
//!
//! Each iteration renders `size` samples as consecutive voice blocks,
//! including the per-block parameter push and note articulation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_acid::{
    engine::TeeBee, io::BlockBuffer, AcidVoice, ControlFrame, ParamId, VoiceConfig, BLOCK_SIZE,
};

use crate::BLOCK_SIZES;

fn voice() -> AcidVoice<TeeBee> {
    let config = VoiceConfig::default();
    AcidVoice::new(config, TeeBee::new(config.sample_rate))
}

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voice");

    for &size in BLOCK_SIZES {
        let blocks = size / BLOCK_SIZE;
        let mut sink = BlockBuffer::new();

        // === HELD NOTE ===
        // gate high, no slide target change: the cheapest sounding path
        let mut held = voice();
        held.render(&ControlFrame::trigger(0.0), &mut sink);

        group.bench_with_input(BenchmarkId::new("held", size), &size, |b, _| {
            b.iter(|| {
                for _ in 0..blocks {
                    held.render(black_box(&ControlFrame::hold(0.0)), &mut sink);
                }
                black_box(&sink);
            })
        });

        // === ACID LINE ===
        // trigger / slide / release every block, heavy resonance and accent
        let mut line = voice();
        let params = line.params();
        params.set(ParamId::Resonance, 90.0);
        params.set(ParamId::EnvMod, 80.0);
        params.set(ParamId::Cutoff, 0.1);
        let frames = [
            ControlFrame::trigger(0.0),
            ControlFrame::hold(1.0),
            ControlFrame::hold(0.25),
            ControlFrame::release(0.25),
        ];

        group.bench_with_input(BenchmarkId::new("acid_line", size), &size, |b, _| {
            let mut step = 0;
            b.iter(|| {
                for _ in 0..blocks {
                    line.render(black_box(&frames[step % frames.len()]), &mut sink);
                    step += 1;
                }
                black_box(&sink);
            })
        });

        // === IDLE ===
        // gate low between notes: release call plus silent engine
        let mut idle = voice();
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                for _ in 0..blocks {
                    idle.render(black_box(&ControlFrame::release(0.0)), &mut sink);
                }
                black_box(&sink);
            })
        });
    }

    group.finish();
}
