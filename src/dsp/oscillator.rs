use std::sync::Arc;

use crate::dsp::wavetable::WaveTable;

/// Phase-accumulating wavetable oscillator.
///
/// Holds two tables and crossfades between them with `blend` (0 = first,
/// 1 = second). Each sample reads the mip level that keeps the current pitch
/// below Nyquist. Without tables the oscillator is silent.
pub struct WaveTableOsc {
    tables: Option<(Arc<WaveTable>, Arc<WaveTable>)>,
    blend: f32,
    phase: f32,
    increment: f32,
    level: usize,
    sample_rate: f32,
}

impl WaveTableOsc {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            tables: None,
            blend: 0.0,
            phase: 0.0,
            increment: 0.0,
            level: 0,
            sample_rate,
        }
    }

    pub fn set_tables(&mut self, first: Arc<WaveTable>, second: Arc<WaveTable>) {
        self.tables = Some((first, second));
    }

    pub fn set_blend(&mut self, blend: f32) {
        self.blend = blend.clamp(0.0, 1.0);
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    pub fn set_frequency(&mut self, hz: f32) {
        self.increment = hz / self.sample_rate;
        self.level = WaveTable::level_for_increment(self.increment);
    }

    pub fn frequency(&self) -> f32 {
        self.increment * self.sample_rate
    }

    /// Mip level currently being read.
    pub fn level(&self) -> usize {
        self.level
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let Some((first, second)) = &self.tables else {
            return 0.0;
        };

        let a = first.read(self.level, self.phase);
        let out = if self.blend <= 0.0 || Arc::ptr_eq(first, second) {
            a
        } else {
            let b = second.read(self.level, self.phase);
            a + self.blend * (b - a)
        };

        self.phase += self.increment;
        if !(0.0..1.0).contains(&self.phase) {
            self.phase -= self.phase.floor();
        }

        out
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::wavetable::{Heap, WaveTableBuilder};

    fn square() -> Arc<WaveTable> {
        Arc::new(WaveTableBuilder::square_303().build(&Heap).expect("heap"))
    }

    fn zero_crossings(buffer: &[f32]) -> usize {
        buffer
            .windows(2)
            .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
            .count()
    }

    #[test]
    fn silent_without_tables() {
        let mut osc = WaveTableOsc::new(48_000.0);
        osc.set_frequency(110.0);
        let mut buffer = vec![1.0f32; 64];
        osc.render(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn frequency_matches_rising_crossings() {
        let table = square();
        let mut osc = WaveTableOsc::new(48_000.0);
        osc.set_tables(table.clone(), table);
        osc.set_frequency(100.0);

        let mut buffer = vec![0.0f32; 48_000];
        osc.render(&mut buffer);

        let crossings = zero_crossings(&buffer);
        assert!(
            (99..=101).contains(&crossings),
            "expected ~100 cycles, got {}",
            crossings
        );
    }

    #[test]
    fn output_stays_bounded() {
        let table = square();
        let mut osc = WaveTableOsc::new(48_000.0);
        osc.set_tables(table.clone(), table);

        for &freq in &[30.0, 220.0, 1_760.0, 7_000.0] {
            osc.set_frequency(freq);
            let mut buffer = vec![0.0f32; 2_048];
            osc.render(&mut buffer);
            let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
            assert!(peak <= 1.5, "peak {} at {} Hz", peak, freq);
        }
    }

    #[test]
    fn higher_pitch_reads_sparser_level() {
        let mut osc = WaveTableOsc::new(48_000.0);
        osc.set_frequency(40.0);
        let low = osc.level();
        osc.set_frequency(4_000.0);
        let high = osc.level();
        assert!(high > low);
    }
}
