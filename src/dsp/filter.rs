use std::f32::consts::PI;

/*
Resonant Ladder Low-Pass
========================

The acid sound lives in its filter: four one-pole low-pass stages in series
(24 dB/octave) with the output fed back, inverted, to the input. Feedback
creates a resonant peak at the cutoff; push it far enough and the filter
whistles on its own (self-oscillation).

    input ──(−)──→ tanh ──→ [1-pole] → [1-pole] → [1-pole] → [1-pole] ──┬──→ out
             ↑                                                           │
             └──────────────────── k × feedback ─────────────────────────┘

Vocabulary
----------

  cutoff      Frequency (Hz) where the response starts to roll off.

  resonance   0.0 to 1.0, mapped onto the feedback gain k (0 to ~4).
              Around k = 4 the loop gain at cutoff reaches unity and the
              filter self-oscillates.

  g           Per-stage coefficient from the bilinear pre-warp:
                  g = tan(π fc / fs)
              Without pre-warping, the cutoff drifts flat as it approaches
              Nyquist.

  tanh        Soft saturation on the summed input. Keeps self-oscillation
              bounded and gives the overdriven, rubbery edge of a driven
              transistor ladder.

The feedback path uses the previous output sample (one-sample delay), which
is a small tuning error at high cutoffs but keeps the loop trivial.
*/

/// Feedback gain at full resonance.
const MAX_FEEDBACK: f32 = 4.0;

pub struct LadderFilter {
    stages: [f32; 4],
    cutoff_hz: f32,
    resonance: f32,
    sample_rate: f32,
    g1: f32,
    k: f32,
}

impl LadderFilter {
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = Self {
            stages: [0.0; 4],
            cutoff_hz: 1_000.0,
            resonance: 0.0,
            sample_rate,
            g1: 0.0,
            k: 0.0,
        };
        filter.update_coefficients();
        filter
    }

    #[inline]
    fn update_coefficients(&mut self) {
        let fc = self.cutoff_hz.clamp(10.0, self.sample_rate * 0.45);
        let g = (PI * fc / self.sample_rate).tan();
        self.g1 = g / (1.0 + g);
        self.k = MAX_FEEDBACK * self.resonance;
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }

    #[inline]
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
        self.update_coefficients();
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    /// Resonance in `[0, 1]`.
    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.0, 1.0);
        self.update_coefficients();
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let x = (input - self.k * self.stages[3]).tanh();
        let g1 = self.g1;

        self.stages[0] += g1 * (x - self.stages[0]);
        self.stages[1] += g1 * (self.stages[0] - self.stages[1]);
        self.stages[2] += g1 * (self.stages[1] - self.stages[2]);
        self.stages[3] += g1 * (self.stages[2] - self.stages[3]);

        self.stages[3]
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.stages = [0.0; 4];
    }
}

/// One-pole high-pass that strips DC and sub-bass rumble from the output.
pub struct DcBlocker {
    coeff: f32,
    x1: f32,
    y1: f32,
}

impl DcBlocker {
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        Self {
            coeff: (-2.0 * PI * cutoff_hz / sample_rate).exp(),
            x1: 0.0,
            y1: 0.0,
        }
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let y = input - self.x1 + self.coeff * self.y1;
        self.x1 = input;
        self.y1 = y;
        y
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin() * 0.5)
            .collect()
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len() / 2;
        buffer[skip..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn passes_dc() {
        let mut filter = LadderFilter::new(48_000.0);
        filter.set_cutoff(500.0);
        let mut buffer = vec![0.5f32; 2_048];
        filter.render(&mut buffer);
        let expected = 0.5f32.tanh();
        assert!((buffer[2_047] - expected).abs() < 1e-3, "got {}", buffer[2_047]);
    }

    #[test]
    fn attenuates_above_cutoff() {
        let sample_rate = 48_000.0;
        let mut filter = LadderFilter::new(sample_rate);
        filter.set_cutoff(300.0);

        let mut low = sine(100.0, sample_rate, 4_800);
        filter.render(&mut low);
        let low_peak = peak_after_transient(&low);

        filter.reset();
        let mut high = sine(4_800.0, sample_rate, 4_800);
        filter.render(&mut high);
        let high_peak = peak_after_transient(&high);

        assert!(
            high_peak * 100.0 < low_peak,
            "expected 24 dB/oct rolloff: low={}, high={}",
            low_peak,
            high_peak
        );
    }

    #[test]
    fn resonance_boosts_cutoff_region() {
        let sample_rate = 48_000.0;
        let cutoff = 1_000.0;

        let mut filter = LadderFilter::new(sample_rate);
        filter.set_cutoff(cutoff);
        filter.set_resonance(0.0);
        let mut flat = sine(cutoff, sample_rate, 4_800);
        filter.render(&mut flat);
        let flat_peak = peak_after_transient(&flat);

        filter.reset();
        filter.set_resonance(0.8);
        let mut peaked = sine(cutoff, sample_rate, 4_800);
        filter.render(&mut peaked);
        let peaked_peak = peak_after_transient(&peaked);

        assert!(
            peaked_peak > flat_peak * 1.5,
            "resonance should boost cutoff: flat={}, peaked={}",
            flat_peak,
            peaked_peak
        );
    }

    #[test]
    fn full_resonance_stays_bounded() {
        let mut filter = LadderFilter::new(48_000.0);
        filter.set_cutoff(800.0);
        filter.set_resonance(1.0);

        let mut buffer = vec![0.0f32; 9_600];
        buffer[0] = 1.0;
        filter.render(&mut buffer);
        assert!(buffer.iter().all(|s| s.is_finite() && s.abs() <= 1.5));
    }

    #[test]
    fn dc_blocker_removes_offset() {
        let mut blocker = DcBlocker::new(48_000.0, 20.0);
        let mut last = 0.0;
        for _ in 0..48_000 {
            last = blocker.next_sample(0.7);
        }
        assert!(last.abs() < 1e-3, "residual DC {}", last);
    }
}
