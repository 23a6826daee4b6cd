use std::mem::size_of;

use rustfft::{num_complex::Complex, FftPlanner};
use thiserror::Error;

/*
Mip-Mapped Wavetables
=====================

A naive square wave (+1 for half a cycle, -1 for the other half) contains
harmonics all the way up to infinity. Sampled at 48 kHz, everything above
24 kHz folds back down as inharmonic garbage (aliasing). Bass notes survive
this, but a C5 square played naively sounds like a broken radio.

The fix is to store the waveform several times, each copy containing fewer
harmonics:

  level   harmonics   safe up to (48 kHz)
  -----   ---------   -------------------
    0       1023         ~23 Hz
    1        511         ~47 Hz
    2        255         ~94 Hz
    3        127         ~189 Hz
    ...
    9          1         whole audio band

At playback the oscillator picks the richest level whose highest harmonic
still sits below Nyquist for the current pitch. Bass notes get the full
spectrum, high notes get a cleaner, rounder wave, nothing aliases.

Building a Level
----------------

  1. Draw one cycle of the prototype (TABLE_LEN samples).
  2. Forward FFT: bin h holds harmonic h.
  3. Zero DC and every bin above the level's harmonic limit.
  4. Inverse FFT.

All levels share one gain so the wave doesn't jump in loudness when the
oscillator crosses a level boundary. Each level carries one guard sample
(a copy of sample 0) so linear interpolation never has to wrap.

Memory
------

The table is allocated once through a TableAllocator. Small hardware hosts
run from fixed pools, so allocation is allowed to fail. Failure is reported
as WaveTableError::OutOfMemory and the caller decides what to do; nothing
here panics on a refused allocation.
*/

/// Samples per cycle at every mip level.
pub const TABLE_LEN: usize = 2048;
/// Number of band-limited copies.
pub const NUM_LEVELS: usize = 12;

const LEVEL_STRIDE: usize = TABLE_LEN + 1;
const MAX_HARMONIC: usize = TABLE_LEN / 2 - 1;

/// Exponential sag rate across the upper half-cycle of the 303-style square.
const SQUARE_DROOP: f32 = 1.2;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WaveTableError {
    #[error("out of memory: wavetable needs {requested} bytes")]
    OutOfMemory { requested: usize },
}

/// Source of the table's backing memory.
pub trait TableAllocator {
    /// Return a zeroed buffer of `len` samples, or fail without panicking.
    fn allocate(&self, len: usize) -> Result<Vec<f32>, WaveTableError>;
}

/// Global heap, with a fallible reservation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Heap;

impl TableAllocator for Heap {
    fn allocate(&self, len: usize) -> Result<Vec<f32>, WaveTableError> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| WaveTableError::OutOfMemory {
                requested: len * size_of::<f32>(),
            })?;
        buffer.resize(len, 0.0);
        Ok(buffer)
    }
}

/// Heap allocation capped at a byte budget, like a fixed hardware pool.
#[derive(Debug, Clone, Copy)]
pub struct Budget(pub usize);

impl TableAllocator for Budget {
    fn allocate(&self, len: usize) -> Result<Vec<f32>, WaveTableError> {
        let requested = len * size_of::<f32>();
        if requested > self.0 {
            return Err(WaveTableError::OutOfMemory { requested });
        }
        Heap.allocate(len)
    }
}

/// Immutable, band-limited single-cycle waveform at `NUM_LEVELS` resolutions.
#[derive(Debug)]
pub struct WaveTable {
    samples: Box<[f32]>,
}

impl WaveTable {
    /// Bytes needed for the sample storage of one table.
    pub const fn size_in_bytes() -> usize {
        NUM_LEVELS * LEVEL_STRIDE * size_of::<f32>()
    }

    /// Highest harmonic kept at `level`.
    pub fn harmonics(level: usize) -> usize {
        (MAX_HARMONIC >> level.min(31)).max(1)
    }

    /// Richest level that does not alias at a phase increment of `inc`
    /// cycles per sample.
    pub fn level_for_increment(inc: f32) -> usize {
        let ratio = MAX_HARMONIC as f32 * 2.0 * inc.abs();
        if !(ratio > 1.0) {
            return 0;
        }
        (ratio.log2().ceil() as usize).min(NUM_LEVELS - 1)
    }

    /// One level including its guard sample (`TABLE_LEN + 1` samples).
    pub fn level(&self, level: usize) -> &[f32] {
        let start = level.min(NUM_LEVELS - 1) * LEVEL_STRIDE;
        &self.samples[start..start + LEVEL_STRIDE]
    }

    /// Linearly interpolated read at `phase` in `[0, 1)`.
    #[inline]
    pub fn read(&self, level: usize, phase: f32) -> f32 {
        let table = self.level(level);
        let pos = phase * TABLE_LEN as f32;
        let index = (pos as usize).min(TABLE_LEN - 1);
        let frac = pos - index as f32;
        table[index] + frac * (table[index + 1] - table[index])
    }
}

/// One-shot generator for a [`WaveTable`].
pub struct WaveTableBuilder {
    prototype: Vec<f32>,
}

impl WaveTableBuilder {
    /// Square wave with the sagging top of the 303's waveshaper.
    ///
    /// The upper half-cycle decays exponentially instead of holding flat,
    /// which gives the square its slightly hollow, reedy character.
    pub fn square_303() -> Self {
        let half = TABLE_LEN / 2;
        let mut prototype: Vec<f32> = (0..TABLE_LEN)
            .map(|i| {
                if i < half {
                    let t = i as f32 / half as f32;
                    (-SQUARE_DROOP * t).exp()
                } else {
                    -1.0
                }
            })
            .collect();

        let mean = prototype.iter().sum::<f32>() / TABLE_LEN as f32;
        for sample in prototype.iter_mut() {
            *sample -= mean;
        }

        Self { prototype }
    }

    /// The full-bandwidth single cycle the levels are derived from.
    pub fn prototype(&self) -> &[f32] {
        &self.prototype
    }

    /// Generate every mip level into memory from `allocator`.
    pub fn build(&self, allocator: &impl TableAllocator) -> Result<WaveTable, WaveTableError> {
        let mut samples = allocator.allocate(NUM_LEVELS * LEVEL_STRIDE)?;

        let mut planner = FftPlanner::<f32>::new();
        let forward = planner.plan_fft_forward(TABLE_LEN);
        let inverse = planner.plan_fft_inverse(TABLE_LEN);

        let mut spectrum: Vec<Complex<f32>> = self
            .prototype
            .iter()
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        forward.process(&mut spectrum);

        let zero = Complex::new(0.0, 0.0);
        let mut work = vec![zero; TABLE_LEN];
        let norm = 1.0 / TABLE_LEN as f32;

        for (level, out) in samples.chunks_exact_mut(LEVEL_STRIDE).enumerate() {
            work.fill(zero);
            for h in 1..=WaveTable::harmonics(level) {
                work[h] = spectrum[h];
                work[TABLE_LEN - h] = spectrum[TABLE_LEN - h];
            }
            inverse.process(&mut work);

            for (o, w) in out.iter_mut().zip(&work) {
                *o = w.re * norm;
            }
        }

        let peak = samples[..TABLE_LEN]
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let gain = if peak > 0.0 { 1.0 / peak } else { 1.0 };

        for out in samples.chunks_exact_mut(LEVEL_STRIDE) {
            for sample in out[..TABLE_LEN].iter_mut() {
                *sample *= gain;
            }
            out[TABLE_LEN] = out[0];
        }

        Ok(WaveTable {
            samples: samples.into_boxed_slice(),
        })
    }
}
