//! Low-level DSP primitives used by the acid engine.
//!
//! Everything here is allocation-free once constructed and safe to run on the
//! audio thread, with the exception of [`wavetable::WaveTableBuilder::build`],
//! which runs once when a voice is created.

/// Exponential parameter curves and unit conversions.
pub mod curve;
/// Exponential ADSR and one-shot decay envelopes.
pub mod envelope;
/// Resonant ladder low-pass and DC blocker.
pub mod filter;
/// Mip-mapped wavetable oscillator.
pub mod oscillator;
/// One-pole glide for slide and accent.
pub mod smooth;
/// Band-limited wavetable generation.
pub mod wavetable;

pub use envelope::EnvelopeState;
pub use wavetable::{WaveTable, WaveTableError};
