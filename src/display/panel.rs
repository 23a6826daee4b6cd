use super::{
    bitmaps::{GLYPH_SIZE, OUT_OF_MEMORY},
    DisplaySurface, HEIGHT, WIDTH,
};
use crate::synth::{
    params::{ParamFrame, ParamId},
    voice::VoiceMonitor,
};

const BAR_WIDTH: i32 = 14;
const BAR_PITCH: i32 = 21;
const BAR_LEFT: i32 = 4;
const BAR_BOTTOM: i32 = HEIGHT as i32 - 4;
const BAR_MAX: i32 = 48;
const GATE_SIZE: i32 = 4;

/// Parameter page: one bar per parameter, plus a gate indicator.
///
/// A degraded voice shows the out-of-memory glyph instead.
#[derive(Debug, Default, Clone)]
pub struct Panel;

impl Panel {
    pub fn new() -> Self {
        Self
    }

    /// Height in pixels of the bar for `id` at `value`.
    pub fn bar_height(id: ParamId, value: f32) -> i32 {
        (id.info().normalize(value) * BAR_MAX as f32).round() as i32
    }

    pub fn draw<S: DisplaySurface + ?Sized>(
        &self,
        surface: &mut S,
        params: &ParamFrame,
        monitor: &VoiceMonitor,
    ) {
        surface.clear();

        if monitor.out_of_memory() {
            let x = (WIDTH as i32 - GLYPH_SIZE) / 2;
            let y = (HEIGHT as i32 - GLYPH_SIZE) / 2;
            surface.draw_xbm(x, y, GLYPH_SIZE, GLYPH_SIZE, &OUT_OF_MEMORY);
            return;
        }

        let values = [
            params.pitch,
            params.accent,
            params.cutoff,
            params.resonance,
            params.env_mod,
            params.decay,
        ];

        for (slot, (id, value)) in ParamId::ALL.iter().zip(values).enumerate() {
            let x = BAR_LEFT + slot as i32 * BAR_PITCH;
            let height = Self::bar_height(*id, value).max(1);
            surface.fill_rect(x, BAR_BOTTOM - height, BAR_WIDTH, height);
            // baseline
            surface.fill_rect(x - 1, BAR_BOTTOM + 1, BAR_WIDTH + 2, 1);
        }

        if monitor.gate_latched() {
            surface.fill_rect(WIDTH as i32 - GATE_SIZE - 1, 1, GATE_SIZE, GATE_SIZE);
        }
    }
}
