/// Fractional note number to frequency in Hz. A4 (note 69) sounds at `tuning`.
#[inline]
pub fn pitch_to_freq(note: f32, tuning: f32) -> f32 {
    tuning * 2.0_f32.powf((note - 69.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_is_tuning() {
        assert!((pitch_to_freq(69.0, 440.0) - 440.0).abs() < 1e-3);
        assert!((pitch_to_freq(69.0, 432.0) - 432.0).abs() < 1e-3);
    }

    #[test]
    fn octaves_double() {
        assert!((pitch_to_freq(57.0, 440.0) - 220.0).abs() < 1e-3);
        assert!((pitch_to_freq(81.0, 440.0) - 880.0).abs() < 1e-2);
    }

    #[test]
    fn fractional_notes_bend_between_semitones() {
        let low = pitch_to_freq(47.0, 440.0);
        let high = pitch_to_freq(48.0, 440.0);
        let mid = pitch_to_freq(47.5, 440.0);
        assert!(low < mid && mid < high);
        assert!((mid - (low * high).sqrt()).abs() < 1e-3);
    }
}
