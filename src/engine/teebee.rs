use std::sync::Arc;

use crate::{
    dsp::{
        curve::db_to_amp,
        envelope::{AnalogEnvelope, DecayEnvelope},
        filter::{DcBlocker, LadderFilter},
        oscillator::WaveTableOsc,
        smooth::OnePole,
        wavetable::WaveTable,
    },
    engine::SynthEngine,
    io::converter::pitch_to_freq,
    DEFAULT_SAMPLE_RATE,
};

/*
TeeBee Signal Path
==================

    glide ─→ oscillator ─→ ladder LPF ─→ DC blocker ─→ × amp env ─→ × volume
                               ↑
              cutoff × 2^(octaves × (env_mod × filter env + accent env))

Filter envelope: a one-shot decay re-fired on every trigger. Slides retarget
the glide but never fire it, so legato notes keep sweeping from where the
previous note left off.

Accent: on accented notes the filter envelope also feeds a slower,
smoothed copy (accent env) that pushes the cutoff further, the filter decay
switches to the accent decay time, and the amplifier gets a boost.
*/

/// Octaves the cutoff rises at full envelope modulation.
const ENV_OCTAVES: f32 = 4.0;
/// Extra amplitude on accented notes at 100% accent.
const ACCENT_BOOST: f32 = 0.5;
/// Amplifier decay toward the sustain level, seconds.
const AMP_DECAY: f32 = 1.23;
/// Amplifier release, seconds. Short enough to gate notes crisply without clicks.
const AMP_RELEASE: f32 = 0.003;
const DC_CUTOFF_HZ: f32 = 24.0;

pub struct TeeBee {
    sample_rate: f32,
    osc: WaveTableOsc,
    filter: LadderFilter,
    dc: DcBlocker,
    amp_env: AnalogEnvelope,
    filter_env: DecayEnvelope,
    accent_env: OnePole,
    glide: OnePole,

    tuning: f32,
    osc_freq: f32,
    pitch_bend_factor: f32,
    cutoff_hz: f32,
    env_mod: f32,
    accent: f32,
    decay_s: f32,
    accent_decay_s: f32,
    amp_sustain: f32,
    volume: f32,

    accented: bool,
}

impl TeeBee {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            osc: WaveTableOsc::new(sample_rate),
            filter: LadderFilter::new(sample_rate),
            dc: DcBlocker::new(sample_rate, DC_CUTOFF_HZ),
            amp_env: AnalogEnvelope::new(sample_rate, 0.0, AMP_DECAY, 1.0, AMP_RELEASE),
            filter_env: DecayEnvelope::new(sample_rate, 1.0),
            accent_env: OnePole::new(sample_rate, 0.003),
            glide: OnePole::new(sample_rate, 0.06),

            tuning: 440.0,
            osc_freq: 440.0,
            pitch_bend_factor: 1.0,
            cutoff_hz: 1_000.0,
            env_mod: 0.25,
            accent: 0.5,
            decay_s: 1.0,
            accent_decay_s: 0.2,
            amp_sustain: 1.0,
            volume: 1.0,

            accented: false,
        }
    }

    /// True while the amplifier envelope is open.
    pub fn is_sounding(&self) -> bool {
        self.amp_env.is_active()
    }

    /// Current glide output in Hz (before pitch bend).
    pub fn current_freq(&self) -> f32 {
        self.glide.value()
    }
}

impl Default for TeeBee {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl SynthEngine for TeeBee {
    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.osc.set_sample_rate(sample_rate);
        self.filter.set_sample_rate(sample_rate);
        self.dc = DcBlocker::new(sample_rate, DC_CUTOFF_HZ);
        self.amp_env.set_sample_rate(sample_rate);
        self.filter_env.set_sample_rate(sample_rate);
        self.accent_env.set_sample_rate(sample_rate);
        self.glide.set_sample_rate(sample_rate);
    }

    fn set_wave_tables(&mut self, first: Arc<WaveTable>, second: Arc<WaveTable>) {
        self.osc.set_tables(first, second);
    }

    fn set_waveform(&mut self, blend: f32) {
        self.osc.set_blend(blend);
    }

    fn set_tuning(&mut self, a4_hz: f32) {
        self.tuning = a4_hz;
    }

    fn tuning(&self) -> f32 {
        self.tuning
    }

    fn set_amp_sustain(&mut self, db: f32) {
        self.amp_sustain = db_to_amp(db).min(1.0);
        self.amp_env.set_sustain(self.amp_sustain);
    }

    fn set_accent_attack(&mut self, ms: f32) {
        self.accent_env.set_time(ms * 0.001);
    }

    fn set_pitch_bend(&mut self, semitones: f32) {
        self.pitch_bend_factor = 2.0_f32.powf(semitones / 12.0);
    }

    fn set_slide_time(&mut self, ms: f32) {
        self.glide.set_time(ms * 0.001);
    }

    fn set_volume(&mut self, db: f32) {
        self.volume = db_to_amp(db);
    }

    fn set_cutoff(&mut self, hz: f32) {
        self.cutoff_hz = hz;
    }

    fn set_resonance(&mut self, percent: f32) {
        self.filter.set_resonance(percent * 0.01);
    }

    fn set_env_mod(&mut self, percent: f32) {
        self.env_mod = (percent * 0.01).clamp(0.0, 1.0);
    }

    fn set_decay(&mut self, ms: f32) {
        self.decay_s = ms * 0.001;
        if !self.accented {
            self.filter_env.set_decay(self.decay_s);
        }
    }

    fn set_accent_decay(&mut self, ms: f32) {
        self.accent_decay_s = ms * 0.001;
        if self.accented {
            self.filter_env.set_decay(self.accent_decay_s);
        }
    }

    fn set_accent(&mut self, percent: f32) {
        self.accent = (percent * 0.01).clamp(0.0, 1.0);
    }

    fn trigger_note(&mut self, note: f32, accent: bool) {
        self.osc_freq = pitch_to_freq(note, self.tuning);
        self.glide.reset_to(self.osc_freq);
        self.accented = accent;

        let decay = if accent { self.accent_decay_s } else { self.decay_s };
        self.filter_env.set_decay(decay);
        self.filter_env.trigger();
        self.amp_env.note_on();
    }

    fn release_note(&mut self, _note: f32) {
        self.amp_env.note_off();
    }

    fn set_osc_freq(&mut self, hz: f32) {
        self.osc_freq = hz;
    }

    #[inline]
    fn get_sample(&mut self) -> f32 {
        if !self.amp_env.is_active() {
            return 0.0;
        }

        let freq = self.glide.next_sample(self.osc_freq) * self.pitch_bend_factor;
        self.osc.set_frequency(freq);
        let raw = self.osc.next_sample();

        let env = self.filter_env.next_sample();
        let accent_target = if self.accented { env * self.accent } else { 0.0 };
        let accent_env = self.accent_env.next_sample(accent_target);

        let sweep = self.env_mod * env + accent_env;
        self.filter.set_cutoff(self.cutoff_hz * 2.0_f32.powf(ENV_OCTAVES * sweep));
        let filtered = self.dc.next_sample(self.filter.next_sample(raw));

        let boost = if self.accented {
            1.0 + ACCENT_BOOST * self.accent
        } else {
            1.0
        };
        let amp = self.amp_env.next_sample() * boost;

        filtered * amp * self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::wavetable::{Heap, WaveTableBuilder};

    fn engine() -> TeeBee {
        let table = Arc::new(WaveTableBuilder::square_303().build(&Heap).expect("heap"));
        let mut engine = TeeBee::new(48_000.0);
        engine.set_wave_tables(table.clone(), table);
        engine.set_waveform(1.0);
        engine.set_cutoff(800.0);
        engine.set_resonance(40.0);
        engine.set_env_mod(50.0);
        engine.set_decay(400.0);
        engine.set_volume(-12.0);
        engine
    }

    fn render(engine: &mut TeeBee, len: usize) -> Vec<f32> {
        (0..len).map(|_| engine.get_sample()).collect()
    }

    fn peak(buffer: &[f32]) -> f32 {
        buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn silent_until_triggered() {
        let mut engine = engine();
        assert!(render(&mut engine, 256).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn trigger_produces_bounded_audio() {
        let mut engine = engine();
        engine.trigger_note(45.0, false);
        let out = render(&mut engine, 4_800);

        let p = peak(&out);
        assert!(p > 0.01, "expected audible output, peak {}", p);
        assert!(p <= 1.0, "output exceeds full scale: {}", p);
        assert!(out.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn release_decays_to_silence() {
        let mut engine = engine();
        engine.trigger_note(45.0, false);
        render(&mut engine, 2_400);
        engine.release_note(45.0);
        render(&mut engine, 4_800);

        assert!(!engine.is_sounding());
        assert!(render(&mut engine, 64).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn slide_glides_instead_of_jumping() {
        let mut engine = engine();
        engine.set_slide_time(60.0);
        engine.trigger_note(45.0, false);
        render(&mut engine, 480);

        let start = engine.current_freq();
        engine.set_osc_freq(pitch_to_freq(57.0, 440.0));
        render(&mut engine, 48);
        let mid = engine.current_freq();
        render(&mut engine, 48_000);
        let end = engine.current_freq();

        assert!(mid > start && mid < end, "start {} mid {} end {}", start, mid, end);
        assert!((end - 220.0).abs() < 0.5, "end {}", end);
    }

    #[test]
    fn trigger_does_not_glide() {
        let mut engine = engine();
        engine.trigger_note(45.0, false);
        render(&mut engine, 480);
        engine.trigger_note(57.0, false);
        engine.get_sample();
        assert!((engine.current_freq() - 220.0).abs() < 1e-2);
    }

    #[test]
    fn accent_is_louder() {
        let mut plain = engine();
        plain.set_accent(100.0);
        plain.trigger_note(45.0, false);
        let plain_peak = peak(&render(&mut plain, 2_400));

        let mut accented = engine();
        accented.set_accent(100.0);
        accented.set_accent_decay(400.0);
        accented.trigger_note(45.0, true);
        let accent_peak = peak(&render(&mut accented, 2_400));

        assert!(
            accent_peak > plain_peak,
            "accent {} vs plain {}",
            accent_peak,
            plain_peak
        );
    }
}
