//! One-pole smoothing, used for slide (portamento) and accent attack.

use crate::MIN_TIME;

/// Exponential glide toward a target value.
///
/// With `time` = 0 the output follows the input immediately.
pub struct OnePole {
    coeff: f32,
    time: f32,
    sample_rate: f32,
    state: f32,
}

impl OnePole {
    /// `time` is the time constant in seconds.
    pub fn new(sample_rate: f32, time: f32) -> Self {
        let mut smoother = Self {
            coeff: 1.0,
            time,
            sample_rate,
            state: 0.0,
        };
        smoother.update();
        smoother
    }

    fn update(&mut self) {
        self.coeff = if self.time <= MIN_TIME {
            1.0
        } else {
            1.0 - (-1.0 / (self.time * self.sample_rate)).exp()
        };
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.time = seconds.max(0.0);
        self.update();
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update();
    }

    /// Jump straight to `value` with no glide.
    pub fn reset_to(&mut self, value: f32) {
        self.state = value;
    }

    #[inline]
    pub fn next_sample(&mut self, target: f32) -> f32 {
        self.state += (target - self.state) * self.coeff;
        self.state
    }

    pub fn value(&self) -> f32 {
        self.state
    }
}
