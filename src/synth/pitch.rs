//! Control voltage to note number.
//!
//! The quantizer snaps the raw pitch voltage to a scale; this module only
//! scales its output to semitones, adds the fixed offsets and clamps.

/// Lowest and highest note the voice will play.
pub const NOTE_MIN: f32 = 0.0;
pub const NOTE_MAX: f32 = 128.0;

/// Semitone range a quantizer works in, far outside the playable notes.
const SEMITONE_LIMIT: f32 = 1536.0;

/// Maps a control voltage plus the pitch knob onto a quantized voltage.
pub trait Quantizer: Send {
    /// Returns volts (1 V/octave) on the quantizer's grid.
    fn quantize(&self, cv: f32, pitch: f32) -> f32;
}

/// Semitone quantizer restricted to the notes of a scale.
///
/// Bit `n` of the mask enables semitone `n` above the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    mask: u16,
}

impl Scale {
    pub const CHROMATIC: Scale = Scale { mask: 0x0fff };
    pub const MAJOR: Scale = Scale { mask: 0b1010_1011_0101 };
    pub const MINOR: Scale = Scale { mask: 0b0101_1010_1101 };
    pub const MINOR_PENTATONIC: Scale = Scale { mask: 0b0100_1010_1001 };
    pub const PHRYGIAN: Scale = Scale { mask: 0b0101_1010_1011 };

    /// Scale from a 12-bit mask. An empty mask falls back to chromatic.
    pub fn from_mask(mask: u16) -> Self {
        let mask = mask & 0x0fff;
        if mask == 0 {
            Self::CHROMATIC
        } else {
            Self { mask }
        }
    }

    pub fn chromatic() -> Self {
        Self::CHROMATIC
    }

    fn contains(&self, semitone: i32) -> bool {
        self.mask & (1 << semitone.rem_euclid(12)) != 0
    }

    /// Nearest semitone in the scale; ties resolve downward.
    pub fn snap(&self, semitone: i32) -> i32 {
        if self.contains(semitone) {
            return semitone;
        }
        for distance in 1..=6 {
            let below = semitone.saturating_sub(distance);
            if self.contains(below) {
                return below;
            }
            let above = semitone.saturating_add(distance);
            if self.contains(above) {
                return above;
            }
        }
        semitone
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::CHROMATIC
    }
}

impl Quantizer for Scale {
    fn quantize(&self, cv: f32, pitch: f32) -> f32 {
        let semitone = ((cv + pitch) * 12.0)
            .round()
            .clamp(-SEMITONE_LIMIT, SEMITONE_LIMIT) as i32;
        self.snap(semitone) as f32 / 12.0
    }
}

/// `base_note + offset + volts * 12`, clamped to `[NOTE_MIN, NOTE_MAX]`.
#[inline]
pub fn resolve_note(base_note: f32, offset: f32, quantized_volts: f32) -> f32 {
    (base_note + offset + quantized_volts * 12.0).clamp(NOTE_MIN, NOTE_MAX)
}
