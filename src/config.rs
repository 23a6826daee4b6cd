//! Voice configuration.
//!
//! Everything here is consumed once, when the voice is built. Per-block
//! control lives in [`VoiceParams`](crate::synth::params::VoiceParams).
//!
//! ```ignore
//! use saavy_acid::VoiceConfig;
//!
//! let config = VoiceConfig::new()
//!     .sample_rate(44_100.0)
//!     .slide_time(80.0)
//!     .volume(-9.0);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::DEFAULT_SAMPLE_RATE;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceConfig {
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Reference pitch of A4 in Hz
    pub tuning: f32,
    /// Glide time between legato notes in milliseconds
    pub slide_time_ms: f32,
    /// Output level in dB
    pub volume_db: f32,
    /// Accent attack time in milliseconds
    pub accent_attack_ms: f32,
    /// Amplitude sustain level in dB (0 = notes hold at full level while gated)
    pub amp_sustain_db: f32,
    /// Note number produced by 0V before the octave offset
    pub base_note: f32,
    /// Fixed transpose added on top of `base_note`, in semitones
    pub octave_offset: f32,
    /// Oscillator waveform blend, 0 = first table, 1 = second table
    pub waveform: f32,
}

impl VoiceConfig {
    pub fn new() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            tuning: 440.0,
            slide_time_ms: 60.0,
            volume_db: -12.0,
            accent_attack_ms: 3.0,
            amp_sustain_db: 0.0,
            base_note: 24.0,
            octave_offset: 24.0,
            waveform: 1.0,
        }
    }

    pub fn sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn tuning(mut self, a4_hz: f32) -> Self {
        self.tuning = a4_hz;
        self
    }

    pub fn slide_time(mut self, ms: f32) -> Self {
        self.slide_time_ms = ms;
        self
    }

    pub fn volume(mut self, db: f32) -> Self {
        self.volume_db = db;
        self
    }

    pub fn accent_attack(mut self, ms: f32) -> Self {
        self.accent_attack_ms = ms;
        self
    }

    pub fn amp_sustain(mut self, db: f32) -> Self {
        self.amp_sustain_db = db;
        self
    }

    pub fn base_note(mut self, note: f32) -> Self {
        self.base_note = note;
        self
    }

    pub fn octave_offset(mut self, semitones: f32) -> Self {
        self.octave_offset = semitones;
        self
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self::new()
    }
}
