/// Note signals for one block: `(trigger, gate)`.
///
/// `trigger` is a one-shot onset edge, `gate` is the held level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteEvent {
    pub trigger: bool,
    pub gate: bool,
}

/// Everything the scheduler hands the voice for one block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlFrame {
    pub trigger: bool,
    pub gate: bool,
    /// Pitch control voltage in volts (1 V/octave), before quantization.
    pub cv: f32,
}

impl ControlFrame {
    /// New note onset with the gate held.
    pub fn trigger(cv: f32) -> Self {
        Self {
            trigger: true,
            gate: true,
            cv,
        }
    }

    /// Gate held, no onset. A changed `cv` slides.
    pub fn hold(cv: f32) -> Self {
        Self {
            trigger: false,
            gate: true,
            cv,
        }
    }

    /// Gate low.
    pub fn release(cv: f32) -> Self {
        Self {
            trigger: false,
            gate: false,
            cv,
        }
    }

    pub fn note_event(&self) -> NoteEvent {
        NoteEvent {
            trigger: self.trigger,
            gate: self.gate,
        }
    }
}
