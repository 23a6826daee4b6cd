//! Step sequencer - turns a 16th-note pattern into per-block control frames
//!
//! Runs in the audio thread. Each call to `next_frame` covers one voice block,
//! so trigger and gate edges land on block boundaries.

use saavy_acid::ControlFrame;

/// Fraction of a step the gate stays high on a plain note.
const GATE_LENGTH: f64 = 0.5;

/// One pattern step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Semitones above the root, or `None` for a rest
    pub semitone: Option<i8>,
    /// Hold the gate into the next step so it glides instead of retriggering
    pub slide: bool,
}

impl Step {
    pub const REST: Step = Step {
        semitone: None,
        slide: false,
    };

    pub const fn note(semitone: i8) -> Self {
        Self {
            semitone: Some(semitone),
            slide: false,
        }
    }

    pub const fn slide(semitone: i8) -> Self {
        Self {
            semitone: Some(semitone),
            slide: true,
        }
    }

    fn slides_out(&self) -> bool {
        self.slide && self.semitone.is_some()
    }
}

pub struct Sequencer {
    steps: Vec<Step>,
    samples_per_step: f64,
    /// Samples elapsed within the current step
    position: f64,
    index: usize,
    /// True for the first block of a step
    fresh: bool,
    cv: f32,
    playing: bool,
}

impl Sequencer {
    pub fn new(bpm: f64, sample_rate: f64, steps: Vec<Step>) -> Self {
        let steps = if steps.is_empty() { vec![Step::REST] } else { steps };
        Self {
            steps,
            samples_per_step: Self::compute_samples_per_step(bpm, sample_rate),
            position: 0.0,
            index: 0,
            fresh: true,
            cv: 0.0,
            playing: true,
        }
    }

    /// 16th notes: four steps per beat
    fn compute_samples_per_step(bpm: f64, sample_rate: f64) -> f64 {
        sample_rate * 60.0 / bpm / 4.0
    }

    /// Control for the next block of `block_len` samples.
    pub fn next_frame(&mut self, block_len: usize) -> ControlFrame {
        if !self.playing {
            return ControlFrame::release(self.cv);
        }

        let len = self.steps.len();
        let step = self.steps[self.index];
        let tied = self.steps[(self.index + len - 1) % len].slides_out();

        let frame = match step.semitone {
            None => ControlFrame::release(self.cv),
            Some(semitone) => {
                self.cv = semitone as f32 / 12.0;
                let held = step.slide || self.position < self.samples_per_step * GATE_LENGTH;
                ControlFrame {
                    trigger: self.fresh && !tied,
                    gate: held,
                    cv: self.cv,
                }
            }
        };

        self.fresh = false;
        self.position += block_len as f64;
        if self.position >= self.samples_per_step {
            self.position -= self.samples_per_step;
            self.index = (self.index + 1) % len;
            self.fresh = true;
        }

        frame
    }

    pub fn step(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.position = 0.0;
        self.index = 0;
        self.fresh = true;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}
