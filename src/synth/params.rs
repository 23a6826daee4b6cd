//! Voice parameters shared between the control surface and the audio thread.
//!
//! Each value is a single `f32` stored as bits in an `AtomicU32`, so a knob
//! write can land in the middle of a block without tearing. No ordering is
//! needed between parameters: the render loop reads every value once per
//! block and the last write before that read wins.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Pitch,
    Accent,
    Cutoff,
    Resonance,
    EnvMod,
    Decay,
}

impl ParamId {
    pub const ALL: [ParamId; 6] = [
        ParamId::Pitch,
        ParamId::Accent,
        ParamId::Cutoff,
        ParamId::Resonance,
        ParamId::EnvMod,
        ParamId::Decay,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn info(self) -> &'static ParamInfo {
        &PARAM_INFO[self.index()]
    }
}

/// Unit shown next to a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// 1 V/octave pitch offset
    Volts,
    /// 1–100
    Percent,
    /// 0.0–1.0, curve-mapped by the engine
    Normalized,
}

impl fmt::Display for ParamUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamUnit::Volts => write!(f, "V"),
            ParamUnit::Percent => write!(f, "%"),
            ParamUnit::Normalized => Ok(()),
        }
    }
}

/// Static metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamInfo {
    pub name: &'static str,
    pub unit: ParamUnit,
    pub default: f32,
    pub min: f32,
    pub max: f32,
    /// Increment for one knob detent / key press.
    pub step: f32,
}

impl ParamInfo {
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Position of `value` within the range, 0.0–1.0.
    pub fn normalize(&self, value: f32) -> f32 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    pub fn format(&self, value: f32) -> String {
        match self.unit {
            ParamUnit::Volts => format!("{:+.2}{}", value, self.unit),
            ParamUnit::Percent => format!("{:.0}{}", value, self.unit),
            ParamUnit::Normalized => format!("{:.2}", value),
        }
    }
}

const PARAM_INFO: [ParamInfo; 6] = [
    ParamInfo {
        name: "Freq",
        unit: ParamUnit::Volts,
        default: 0.0,
        min: -4.0,
        max: 4.0,
        step: 1.0 / 12.0,
    },
    ParamInfo {
        name: "Acc",
        unit: ParamUnit::Percent,
        default: 100.0,
        min: 1.0,
        max: 100.0,
        step: 1.0,
    },
    ParamInfo {
        name: "Cutoff",
        unit: ParamUnit::Normalized,
        default: 0.25,
        min: 0.0,
        max: 1.0,
        step: 0.01,
    },
    ParamInfo {
        name: "Reso",
        unit: ParamUnit::Percent,
        default: 33.0,
        min: 1.0,
        max: 100.0,
        step: 1.0,
    },
    ParamInfo {
        name: "EnvMod",
        unit: ParamUnit::Percent,
        default: 25.0,
        min: 1.0,
        max: 100.0,
        step: 1.0,
    },
    ParamInfo {
        name: "Dec",
        unit: ParamUnit::Normalized,
        default: 0.5,
        min: 0.0,
        max: 1.0,
        step: 0.01,
    },
];

/// Plain copy of every parameter, taken once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamFrame {
    pub pitch: f32,
    pub accent: f32,
    pub cutoff: f32,
    pub resonance: f32,
    pub env_mod: f32,
    pub decay: f32,
}

impl Default for ParamFrame {
    fn default() -> Self {
        Self {
            pitch: ParamId::Pitch.info().default,
            accent: ParamId::Accent.info().default,
            cutoff: ParamId::Cutoff.info().default,
            resonance: ParamId::Resonance.info().default,
            env_mod: ParamId::EnvMod.info().default,
            decay: ParamId::Decay.info().default,
        }
    }
}

/// Lock-free parameter store.
pub struct VoiceParams {
    values: [AtomicU32; 6],
}

impl VoiceParams {
    pub fn new() -> Self {
        Self {
            values: ParamId::ALL.map(|id| AtomicU32::new(id.info().default.to_bits())),
        }
    }

    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        f32::from_bits(self.values[id.index()].load(Ordering::Relaxed))
    }

    /// Store `value` as-is. Range checks belong to the control surface.
    #[inline]
    pub fn set(&self, id: ParamId, value: f32) {
        self.values[id.index()].store(value.to_bits(), Ordering::Relaxed);
    }

    /// Move a parameter by `steps` detents, clamped to its range.
    pub fn nudge(&self, id: ParamId, steps: f32) -> f32 {
        let info = id.info();
        let value = info.clamp(self.get(id) + steps * info.step);
        self.set(id, value);
        value
    }

    pub fn reset(&self) {
        for id in ParamId::ALL {
            self.set(id, id.info().default);
        }
    }

    pub fn snapshot(&self) -> ParamFrame {
        ParamFrame {
            pitch: self.get(ParamId::Pitch),
            accent: self.get(ParamId::Accent),
            cutoff: self.get(ParamId::Cutoff),
            resonance: self.get(ParamId::Resonance),
            env_mod: self.get(ParamId::EnvMod),
            decay: self.get(ParamId::Decay),
        }
    }
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self::new()
    }
}
