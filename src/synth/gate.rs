use crate::{engine::SynthEngine, io::converter::pitch_to_freq, synth::message::NoteEvent};

/// What the gate did with one block's note event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Articulation {
    /// New note: envelopes restarted.
    Trigger,
    /// Gate low: note released.
    Release,
    /// Gate held without a trigger: oscillator retuned, envelopes untouched.
    Slide,
}

/// Note/gate state machine.
///
/// Priority is trigger, then gate-low, then slide. Exactly one engine note
/// call is made per block. The latch goes high on any held gate and only a
/// gate-low block clears it.
#[derive(Debug, Default, Clone)]
pub struct NoteGate {
    latched: bool,
}

impl NoteGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance<E: SynthEngine + ?Sized>(
        &mut self,
        event: NoteEvent,
        note: f32,
        accent: bool,
        engine: &mut E,
    ) -> Articulation {
        self.latched |= event.gate;

        if event.trigger {
            engine.trigger_note(note, accent);
            Articulation::Trigger
        } else if !event.gate {
            engine.release_note(note);
            self.latched = false;
            Articulation::Release
        } else {
            let hz = pitch_to_freq(note, engine.tuning());
            engine.set_osc_freq(hz);
            Articulation::Slide
        }
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }
}
