//! The synthesis engine seen by the voice.
//!
//! [`AcidVoice`](crate::synth::voice::AcidVoice) never touches oscillators or
//! filters directly; it drives a [`SynthEngine`] through this small set of
//! setters and note events. [`TeeBee`] is the engine shipped with the crate,
//! tests substitute a recording fake.

mod teebee;

use std::sync::Arc;

use crate::dsp::wavetable::WaveTable;

pub use teebee::TeeBee;

/// Opaque oscillator + filter + envelope unit.
///
/// Units follow the knobs they model: times in milliseconds, levels in dB,
/// amounts in percent (0–100), frequencies in Hz. Setters are called once per
/// block from the audio thread and must not allocate.
pub trait SynthEngine: Send {
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Tables for the two oscillator slots; `set_waveform` blends between them.
    fn set_wave_tables(&mut self, first: Arc<WaveTable>, second: Arc<WaveTable>);

    /// 0.0 = first table, 1.0 = second table.
    fn set_waveform(&mut self, blend: f32);

    /// Frequency of A4 in Hz.
    fn set_tuning(&mut self, a4_hz: f32);
    fn tuning(&self) -> f32;

    fn set_amp_sustain(&mut self, db: f32);
    fn set_accent_attack(&mut self, ms: f32);
    fn set_pitch_bend(&mut self, semitones: f32);
    fn set_slide_time(&mut self, ms: f32);
    fn set_volume(&mut self, db: f32);

    fn set_cutoff(&mut self, hz: f32);
    fn set_resonance(&mut self, percent: f32);
    fn set_env_mod(&mut self, percent: f32);
    fn set_decay(&mut self, ms: f32);
    fn set_accent_decay(&mut self, ms: f32);
    fn set_accent(&mut self, percent: f32);

    /// Start a note: re-attacks every envelope.
    fn trigger_note(&mut self, note: f32, accent: bool);
    fn release_note(&mut self, note: f32);

    /// Retarget the oscillator without touching the envelopes (slide).
    fn set_osc_freq(&mut self, hz: f32);

    fn get_sample(&mut self) -> f32;
}
