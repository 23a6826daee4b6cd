use crate::MIN_TIME;

/*
Analog-Style Envelopes
======================

Two envelope generators drive the acid voice: an ADSR for the amplifier and
a one-shot decay for the filter sweep. Both use EXPONENTIAL segments, which
is what a capacitor charging through a resistor produces in analog
envelope circuits.

Vocabulary
----------

  level       The envelope's current output value (0.0 to 1.0).

  stage       Which phase of the envelope we're in: Idle, Attack, Decay,
              Sustain, or Release.

  time        Time constant (tau) of a segment in seconds: after one tau the
              level has covered ~63% of the distance to its target, after
              five tau more than 99%.

  coefficient The per-sample smoothing factor derived from tau:

                  coeff = 1 - exp(-1 / (tau * sample_rate))
                  level += (target - level) * coeff


Why Exponential?
----------------

  Level
    1.0 ┐ ╭╮
        │ │ ╲
        │ │  ╲_
    S   │ │    ‾‾‾‾‾‾‾‾‾‾‾‾‾╲
        │ │                  ╲_
    0.0 └─╯────────────────────‾‾──→ Time
         A   D     Sustain     R

Linear ramps end abruptly; exponential ones slow down as they approach their
target, which sounds like a plucked, damped string rather than a fader
being pulled. The characteristic "squelch" of a 303 comes from the filter
cutoff following such a curve.


The ADSR State Machine
----------------------

    Idle ──note_on──→ Attack ──level≥1──→ Decay ──near S──→ Sustain
      ↑                 │                   │                  │
      │                 └─────note_off──────┴───────note_off───┤
      │                                                        ↓
      └──────────────────── level < floor ─────────────── Release

note_on always restarts the attack from the CURRENT level (no reset to zero),
so a retrigger during a loud note doesn't click. note_off releases from
wherever the envelope is.


The Decay Envelope
------------------

The filter envelope has no attack or sustain: a trigger snaps the level to
1.0 and it falls back toward 0 with a single time constant. Every trigger
restarts it, which is why the 303's filter "pings" on each new note but not
on slides.
*/

/// Below this level an envelope counts as finished (-100 dB).
const SILENCE_FLOOR: f32 = 1e-5;
/// Distance from the sustain level at which decay is considered settled.
const SETTLE_EPSILON: f32 = 1e-4;

#[inline]
fn coefficient(time: f32, sample_rate: f32) -> f32 {
    if time <= MIN_TIME {
        1.0
    } else {
        1.0 - (-1.0 / (time * sample_rate)).exp()
    }
}

/// The current stage of the ADSR state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // Not sounding, level = 0
    Attack,  // Rising toward 1.0
    Decay,   // Falling toward sustain
    Sustain, // Holding at sustain while gated
    Release, // Falling toward 0 after note_off
}

/// Exponential ADSR, used as the amplifier envelope.
pub struct AnalogEnvelope {
    attack_coeff: f32,
    decay_coeff: f32,
    release_coeff: f32,
    sustain_level: f32,

    attack_time: f32,
    decay_time: f32,
    release_time: f32,
    sample_rate: f32,

    stage: EnvelopeState,
    level: f32,
}

impl AnalogEnvelope {
    /// Times in seconds, sustain as a linear level.
    pub fn new(sample_rate: f32, attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        let mut env = Self {
            attack_coeff: 1.0,
            decay_coeff: 1.0,
            release_coeff: 1.0,
            sustain_level: sustain.clamp(0.0, 1.0),
            attack_time: attack.max(0.0),
            decay_time: decay.max(0.0),
            release_time: release.max(0.0),
            sample_rate,
            stage: EnvelopeState::Idle,
            level: 0.0,
        };
        env.update_coefficients();
        env
    }

    fn update_coefficients(&mut self) {
        self.attack_coeff = coefficient(self.attack_time, self.sample_rate);
        self.decay_coeff = coefficient(self.decay_time, self.sample_rate);
        self.release_coeff = coefficient(self.release_time, self.sample_rate);
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }

    pub fn set_attack(&mut self, seconds: f32) {
        self.attack_time = seconds.max(0.0);
        self.attack_coeff = coefficient(self.attack_time, self.sample_rate);
    }

    pub fn set_decay(&mut self, seconds: f32) {
        self.decay_time = seconds.max(0.0);
        self.decay_coeff = coefficient(self.decay_time, self.sample_rate);
    }

    pub fn set_sustain(&mut self, level: f32) {
        self.sustain_level = level.clamp(0.0, 1.0);
    }

    pub fn set_release(&mut self, seconds: f32) {
        self.release_time = seconds.max(0.0);
        self.release_coeff = coefficient(self.release_time, self.sample_rate);
    }

    /// Gate high: attack from the current level.
    pub fn note_on(&mut self) {
        self.stage = EnvelopeState::Attack;
    }

    /// Gate low: release from the current level.
    pub fn note_off(&mut self) {
        if self.stage != EnvelopeState::Idle {
            self.stage = EnvelopeState::Release;
        }
    }

    /// Advance one sample and return the new level.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.level += (1.0 - self.level) * self.attack_coeff;
                if self.level >= 1.0 - SETTLE_EPSILON {
                    self.level = 1.0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                self.level += (self.sustain_level - self.level) * self.decay_coeff;
                if (self.level - self.sustain_level).abs() < SETTLE_EPSILON {
                    self.level = self.sustain_level;
                    self.stage = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                self.level = self.sustain_level;
            }

            EnvelopeState::Release => {
                self.level -= self.level * self.release_coeff;
                if self.level < SILENCE_FLOOR {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        self.level
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeState::Idle
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}

/// One-shot exponential decay, used for the filter sweep.
pub struct DecayEnvelope {
    coeff: f32,
    decay_time: f32,
    sample_rate: f32,
    level: f32,
}

impl DecayEnvelope {
    pub fn new(sample_rate: f32, decay: f32) -> Self {
        Self {
            coeff: coefficient(decay, sample_rate),
            decay_time: decay,
            sample_rate,
            level: 0.0,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.coeff = coefficient(self.decay_time, sample_rate);
    }

    /// Time constant in seconds.
    pub fn set_decay(&mut self, seconds: f32) {
        if seconds != self.decay_time {
            self.decay_time = seconds;
            self.coeff = coefficient(seconds, self.sample_rate);
        }
    }

    pub fn trigger(&mut self) {
        self.level = 1.0;
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let out = self.level;
        self.level -= self.level * self.coeff;
        if self.level < SILENCE_FLOOR {
            self.level = 0.0;
        }
        out
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}
