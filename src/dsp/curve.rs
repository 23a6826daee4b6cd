/*
Exponential Parameter Curves
============================

Knobs live in a linear world (0.0 to 1.0), ears do not. A filter sweep from
300 Hz to 2400 Hz spans three octaves; if the knob mapped linearly, the first
10% of travel would cover a whole octave while the last 10% barely moves.

lin_to_exp interpolates in the log domain instead:

    t = (x - x_min) / (x_max - x_min)
    y = y_min * exp(t * ln(y_max / y_min))

Equal knob movements now give equal musical ratios:

    x      0.0    0.25    0.5     0.75    1.0
    Hz     314    521     867     1441    2394   (cutoff)
    ms     200    356     632     1125    2000   (decay)

No clamping happens here. Values outside [x_min, x_max] extrapolate along the
same curve; callers clamp where they need to. y_min and y_max must share a
sign and be non-zero.
*/

/// Cutoff knob range in Hz.
pub const CUTOFF_MIN_HZ: f32 = 314.0;
pub const CUTOFF_MAX_HZ: f32 = 2394.0;

/// Decay knob range in milliseconds. Shared by the plain and accented decay.
pub const DECAY_MIN_MS: f32 = 200.0;
pub const DECAY_MAX_MS: f32 = 2000.0;

/// Map `x` in `[x_min, x_max]` onto `[y_min, y_max]` along an exponential curve.
#[inline]
pub fn lin_to_exp(x: f32, x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> f32 {
    let t = (x - x_min) / (x_max - x_min);
    y_min * (t * (y_max / y_min).ln()).exp()
}

/// Inverse of [`lin_to_exp`].
#[inline]
pub fn exp_to_lin(y: f32, y_min: f32, y_max: f32, x_min: f32, x_max: f32) -> f32 {
    let t = (y / y_min).ln() / (y_max / y_min).ln();
    x_min + t * (x_max - x_min)
}

/// Normalized cutoff knob to filter cutoff in Hz.
#[inline]
pub fn cutoff_hz(knob: f32) -> f32 {
    lin_to_exp(knob, 0.0, 1.0, CUTOFF_MIN_HZ, CUTOFF_MAX_HZ)
}

/// Normalized decay knob to envelope decay in milliseconds.
#[inline]
pub fn decay_ms(knob: f32) -> f32 {
    lin_to_exp(knob, 0.0, 1.0, DECAY_MIN_MS, DECAY_MAX_MS)
}

/// Decibels to linear amplitude.
#[inline]
pub fn db_to_amp(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}
